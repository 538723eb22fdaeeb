//! Short question answering backed by an OpenAI-compatible chat completion API

mod error;
mod generator;
mod protocol;

pub use error::AnswerError;
pub use generator::{AnswerGenerator, question_from};
