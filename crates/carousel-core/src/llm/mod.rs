//! Text generation over hosted LLM APIs.
//!
//! Provides a provider abstraction over OpenAI and Anthropic and the
//! rate-limit retry wrapper every text call goes through.

pub(crate) mod anthropic;
pub(crate) mod openai;
pub(crate) mod provider;
pub mod retry;

pub use provider::{TextProvider, TextProviderFactory, TextRequest, TextResponse};
pub use retry::{
    call_with_retry, RetryNotice, RetryObserver, RetryOutcome, RetryPolicy, SilentObserver,
    Sleeper, TokioSleeper,
};
