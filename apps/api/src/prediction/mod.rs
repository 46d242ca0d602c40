// Property prediction: prompt template, completion call, pipe-delimited reply parsing.
// All completion calls go through llm_client: no direct HTTP calls here.

pub mod handlers;
pub mod parser;
pub mod predictor;
pub mod prompts;
