mod provider;
mod transport;
mod types;

pub use provider::OllamaProvider;
pub use transport::{OLLAMA_HOST_URL, OllamaHttpTransport, OllamaTransport};
pub use types::{
    OllamaChatRequest, OllamaChatResponse, OllamaFunction, OllamaFunctionCall, OllamaMessage,
    OllamaOptions, OllamaTool, OllamaToolCall,
};
