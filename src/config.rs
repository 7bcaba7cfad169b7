//! # Configuración del Servidor
//! src/config.rs
//!
//! Este módulo define la configuración del servidor HTTP con soporte
//! para argumentos CLI y variables de entorno.
//!
//! ## Ejemplos de uso
//!
//! ### CLI
//! ```bash
//! ./fileserver --port 4221 --directory /tmp/blobs
//! ```
//!
//! ### Variables de entorno
//! ```bash
//! HTTP_PORT=4221 BLOB_DIR=/tmp/blobs ./fileserver
//! ```

use clap::Parser;

/// Configuración del servidor HTTP/1.1
#[derive(Debug, Clone, Parser)]
#[command(name = "fileserver")]
#[command(about = "Servidor HTTP/1.1 minimalista con blob store y compresión gzip")]
#[command(version = "0.1.0")]
pub struct Config {
    /// Puerto en el que escucha el servidor
    #[arg(short, long, default_value = "4221", env = "HTTP_PORT")]
    pub port: u16,

    /// Host/IP en el que escucha
    #[arg(long, default_value = "127.0.0.1", env = "HTTP_HOST")]
    pub host: String,

    /// Directorio base del blob store (rutas /files/)
    #[arg(long = "directory", default_value = "./data", env = "BLOB_DIR")]
    pub directory: String,

    /// Timeout de lectura/escritura por conexión en milisegundos (0 = sin timeout)
    #[arg(long = "timeout-ms", default_value = "10000", env = "CONN_TIMEOUT_MS")]
    pub timeout_ms: u64,
}

impl Config {
    /// Crea una nueva configuración parseando argumentos CLI
    pub fn new() -> Self {
        Config::parse()
    }

    /// Obtiene la dirección completa para bind (host:port)
    ///
    /// # Ejemplo
    /// ```rust
    /// use fileserver::config::Config;
    ///
    /// let config = Config::default();
    /// assert_eq!(config.address(), "127.0.0.1:4221");
    /// ```
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Timeout por conexión; `None` si está deshabilitado
    pub fn connection_timeout(&self) -> Option<std::time::Duration> {
        if self.timeout_ms == 0 {
            None
        } else {
            Some(std::time::Duration::from_millis(self.timeout_ms))
        }
    }

    /// Valida la configuración
    ///
    /// Retorna errores si hay valores inválidos
    pub fn validate(&self) -> Result<(), String> {
        if self.host.trim().is_empty() {
            return Err("Host must not be empty".to_string());
        }
        if self.directory.trim().is_empty() {
            return Err("Blob directory must not be empty".to_string());
        }
        Ok(())
    }
}

impl Default for Config {
    /// Configuración por defecto
    fn default() -> Self {
        Self {
            port: 4221,
            host: "127.0.0.1".to_string(),
            directory: "./data".to_string(),
            timeout_ms: 10_000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.port, 4221);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.directory, "./data");
        assert_eq!(config.timeout_ms, 10_000);
    }

    #[test]
    fn test_address() {
        let config = Config::default();
        assert_eq!(config.address(), "127.0.0.1:4221");
    }

    #[test]
    fn test_address_custom() {
        let mut config = Config::default();
        config.host = "0.0.0.0".to_string();
        config.port = 3000;
        assert_eq!(config.address(), "0.0.0.0:3000");
    }

    #[test]
    fn test_validate_success() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_empty_host() {
        let mut config = Config::default();
        config.host = "  ".to_string();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Host"));
    }

    #[test]
    fn test_validate_empty_directory() {
        let mut config = Config::default();
        config.directory = "".to_string();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("directory"));
    }

    #[test]
    fn test_connection_timeout_disabled() {
        let mut config = Config::default();
        config.timeout_ms = 0;
        assert_eq!(config.connection_timeout(), None);
    }

    #[test]
    fn test_connection_timeout_enabled() {
        let config = Config::default();
        assert_eq!(
            config.connection_timeout(),
            Some(std::time::Duration::from_secs(10))
        );
    }
}
