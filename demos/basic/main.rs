use std::time::Duration;

use chat_dispatch::prelude::*;
use log::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  env_logger::init();

  let dispatcher = Dispatcher::new(
    Catalog::builtin(),
    Endpoints::from_env(),
    Policies {
      timeout_policy: TimeoutPolicy::new(Duration::from_secs(60)),
    },
  );

  let mut handles = vec![];
  for option in ["option1", "option3", "option4"] {
    handles.push(tokio::spawn({
      let dispatcher = dispatcher.clone();
      async move {
        let reply = dispatcher
          .simple_chat(option, "Hei, hvem er du?", "")
          .await;
        (option, reply)
      }
    }));
  }
  for (option, reply) in futures::future::try_join_all(handles).await? {
    info!("{}: {}", option, reply?);
  }

  let answer = dispatcher.assistant("Hva kan du hjelpe meg med?").await?;
  info!("assistant: {}", answer);

  Ok(())
}
