//! Provides a useful collection of `chat-dispatch` types

pub use crate::{
  assistant::{AssistantRequest, AssistantResponse},
  catalog::{Catalog, OptionTemplate, SamplingParameters},
  chat::{
    nora::{NoraChatRequest, NoraResponse},
    simple::{ChatResponse, SimpleChatRequest},
  },
  endpoints::{Endpoint, Endpoints},
  error::{DispatchError, Result},
  policies::{Policies, TimeoutPolicy},
  vision::{VisionRequest, VisionResponse},
  Dispatcher,
};
