//! # Negociación y Aplicación de Content-Encoding
//! src/encoding/mod.rs
//!
//! Este módulo implementa la negociación de compresión con el cliente
//! y la transformación del body de la respuesta.
//!
//! ## Negociación
//!
//! El cliente ofrece codecs en `Accept-Encoding` separados por comas:
//!
//! ```text
//! Accept-Encoding: identity, gzip, br
//! ```
//!
//! Se elige el **primer** token ofrecido que el servidor soporte (hoy
//! solo gzip). Sin coincidencia, la respuesta sale sin comprimir.
//!
//! ## Orden del pipeline
//!
//! `apply` debe correr después de que el dispatcher pobló status, body y
//! content-type, y antes de serializar: `Content-Length` tiene que
//! reflejar el largo del body final (posiblemente comprimido).

use crate::http::{Request, Response};
use flate2::write::GzEncoder;
use flate2::Compression;
use std::io::Write;

/// Codecs de compresión que soporta el servidor
///
/// El enum es la única fuente de verdad: `negotiate` solo puede retornar
/// variantes de acá y el match de `apply` es exhaustivo, así que el set
/// negociado y el set aplicable no pueden divergir.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// gzip (RFC 1952), vía flate2
    Gzip,
}

impl Encoding {
    /// Parsea un token de `Accept-Encoding`
    ///
    /// Retorna `None` para codecs no soportados (no es un error: el
    /// cliente puede ofrecer lo que quiera).
    fn from_token(token: &str) -> Option<Self> {
        match token {
            "gzip" => Some(Encoding::Gzip),
            _ => None,
        }
    }

    /// Nombre del codec tal como va en `Content-Encoding`
    pub fn as_str(&self) -> &'static str {
        match self {
            Encoding::Gzip => "gzip",
        }
    }
}

/// Elige un codec soportado a partir del header `Accept-Encoding`
///
/// Separa el header por comas, recorta espacios y retorna el primer
/// token soportado en el orden en que el cliente los ofreció.
///
/// # Ejemplo
/// ```
/// use fileserver::encoding::{negotiate, Encoding};
/// use fileserver::http::Request;
///
/// let raw = b"GET / HTTP/1.1\r\nAccept-Encoding: identity, gzip\r\n\r\n";
/// let request = Request::parse(raw).unwrap();
///
/// // identity no está soportado; gzip es el primer token soportado
/// assert_eq!(negotiate(&request), Some(Encoding::Gzip));
/// ```
pub fn negotiate(request: &Request) -> Option<Encoding> {
    let offered = request.header("Accept-Encoding")?;

    offered
        .split(',')
        .map(str::trim)
        .find_map(Encoding::from_token)
}

/// Aplica el codec negociado a la respuesta, mutándola in place
///
/// Establece `Content-Encoding`, reemplaza el body por su forma
/// comprimida y recalcula `Content-Length` (lo hace `set_body`).
///
/// Un fallo de compresión se propaga como `io::Error`: lo maneja la
/// capa de conexión, nunca tumba el proceso.
pub fn apply(response: &mut Response, encoding: Encoding) -> std::io::Result<()> {
    let compressed = match encoding {
        Encoding::Gzip => gzip_compress(response.body())?,
    };

    response.set_header("Content-Encoding", encoding.as_str());
    response.set_body(compressed);
    Ok(())
}

/// Comprime un buffer con gzip (nivel por defecto)
fn gzip_compress(data: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    encoder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::read::GzDecoder;
    use std::io::Read;

    fn request_with_accept_encoding(value: &str) -> Request {
        let raw = format!("GET / HTTP/1.1\r\nAccept-Encoding: {}\r\n\r\n", value);
        Request::parse(raw.as_bytes()).unwrap()
    }

    fn gzip_decompress(data: &[u8]) -> Vec<u8> {
        let mut decoder = GzDecoder::new(data);
        let mut out = Vec::new();
        decoder.read_to_end(&mut out).unwrap();
        out
    }

    #[test]
    fn test_negotiate_gzip() {
        let request = request_with_accept_encoding("gzip");
        assert_eq!(negotiate(&request), Some(Encoding::Gzip));
    }

    #[test]
    fn test_negotiate_absent_header() {
        let request = Request::parse(b"GET / HTTP/1.1\r\n\r\n").unwrap();
        assert_eq!(negotiate(&request), None);
    }

    #[test]
    fn test_negotiate_unsupported_codec() {
        let request = request_with_accept_encoding("br");
        assert_eq!(negotiate(&request), None);
    }

    #[test]
    fn test_negotiate_first_supported_wins() {
        // identity aparece primero pero no está soportado: gana gzip
        let request = request_with_accept_encoding("identity, gzip");
        assert_eq!(negotiate(&request), Some(Encoding::Gzip));
    }

    #[test]
    fn test_negotiate_trims_tokens() {
        let request = request_with_accept_encoding("  br ,   gzip  ");
        assert_eq!(negotiate(&request), Some(Encoding::Gzip));
    }

    #[test]
    fn test_apply_sets_content_encoding() {
        let mut response = Response::text("abc");
        apply(&mut response, Encoding::Gzip).unwrap();

        assert_eq!(response.headers().get("Content-Encoding"), Some("gzip"));
    }

    #[test]
    fn test_apply_roundtrip() {
        // Ley de round-trip: comprimir y descomprimir devuelve el original
        let mut response = Response::text("abc");
        apply(&mut response, Encoding::Gzip).unwrap();

        assert_eq!(gzip_decompress(response.body()), b"abc");
    }

    #[test]
    fn test_apply_recalculates_content_length() {
        let mut response = Response::text("abc");
        apply(&mut response, Encoding::Gzip).unwrap();

        let declared: usize = response
            .headers()
            .get("Content-Length")
            .unwrap()
            .parse()
            .unwrap();
        assert_eq!(declared, response.body().len());
    }

    #[test]
    fn test_apply_roundtrip_binary_body() {
        let original: Vec<u8> = (0u8..=255).cycle().take(4096).collect();
        let mut response = Response::binary(original.clone());
        apply(&mut response, Encoding::Gzip).unwrap();

        assert_eq!(gzip_decompress(response.body()), original);
    }
}
