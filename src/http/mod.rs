//! # Módulo HTTP
//!
//! Este módulo implementa el protocolo HTTP/1.1 desde cero, sin usar
//! librerías de alto nivel. Incluye:
//!
//! - Parsing de requests HTTP/1.1
//! - Construcción de responses HTTP
//! - Manejo de status codes
//! - Mapa de headers case-insensitive
//!
//! ## Alcance
//!
//! Una conexión transporta exactamente un request y una response
//! (`Connection: close` implícito): no hay keep-alive, pipelining ni
//! chunked transfer encoding.
//!
//! ### Formato de Request
//!
//! ```text
//! GET /echo/abc HTTP/1.1\r\n
//! Host: localhost:4221\r\n
//! Accept-Encoding: gzip\r\n
//! \r\n
//! ```
//!
//! ### Formato de Response
//!
//! ```text
//! HTTP/1.1 200 OK\r\n
//! content-type: text/plain\r\n
//! content-length: 3\r\n
//! \r\n
//! abc
//! ```

pub mod headers;   // Mapa de headers case-insensitive
pub mod request;   // Parsing de HTTP requests
pub mod response;  // Construcción de HTTP responses
pub mod status;    // Códigos de estado HTTP

// Re-exportamos los tipos principales para facilitar su uso
// Esto permite usar `http::Request` en vez de `http::request::Request`
pub use headers::HeaderMap;
pub use request::{Method, ParseError, Request};
pub use response::Response;
pub use status::StatusCode;
