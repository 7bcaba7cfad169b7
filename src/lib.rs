//! # fileserver
//! src/lib.rs
//!
//! Servidor HTTP/1.1 minimalista implementado desde cero: parser de
//! requests, builder de responses, negociación de compresión gzip y
//! una tabla fija de rutas respaldada por un blob store en disco.
//!
//! ## Arquitectura
//!
//! El servidor está dividido en módulos especializados:
//! - `http`: Parsing y serialización del protocolo HTTP/1.1
//! - `encoding`: Negociación y aplicación de Content-Encoding (gzip)
//! - `storage`: Blob store sobre un directorio configurable
//! - `router`: Enrutamiento de peticiones a handlers
//! - `handlers`: Implementación de los handlers de cada ruta
//! - `server`: Lógica del servidor TCP y manejo de conexiones
//! - `config`: Configuración por CLI y variables de entorno
//!
//! ## Ejemplo de uso
//!
//! ```no_run
//! use fileserver::config::Config;
//! use fileserver::server::Server;
//!
//! let config = Config::default();
//! let server = Server::new(config);
//! server.run().expect("Error al iniciar servidor");
//! ```

pub mod config;
pub mod encoding;
pub mod handlers;
pub mod http;
pub mod router;
pub mod server;
pub mod storage;
