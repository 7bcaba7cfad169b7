//! # Construcción de Respuestas HTTP
//!
//! Este módulo proporciona una API para construir respuestas HTTP/1.1
//! de forma programática y convertirlas a bytes para enviar al cliente.
//!
//! ## Formato de una respuesta HTTP/1.1
//!
//! ```text
//! HTTP/1.1 200 OK\r\n
//! content-type: text/plain\r\n
//! content-length: 3\r\n
//! \r\n
//! abc
//! ```
//!
//! ## Pipeline
//!
//! La respuesta nace en el dispatcher, puede ser mutada por el
//! transformador de encoding (que recalcula `Content-Length`) y recién
//! entonces se serializa. `Default` es 404: el valor de arranque antes
//! de que alguna ruta la refine.

use super::{HeaderMap, StatusCode};

/// Representa una respuesta HTTP/1.1 completa
#[derive(Debug, Clone)]
pub struct Response {
    /// Código de estado HTTP (200, 404, etc.)
    status: StatusCode,

    /// Headers HTTP (Content-Type, Content-Length, etc.)
    headers: HeaderMap,

    /// Cuerpo de la respuesta (puede ser vacío)
    body: Vec<u8>,
}

impl Response {
    /// Crea una respuesta con el código de estado dado, sin headers ni body
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: Vec::new(),
        }
    }

    /// Respuesta 404 Not Found vacía (valor por defecto del pipeline)
    ///
    /// # Ejemplo
    /// ```
    /// use fileserver::http::{Response, StatusCode};
    ///
    /// let response = Response::not_found();
    /// assert_eq!(response.status(), StatusCode::NotFound);
    /// ```
    pub fn not_found() -> Self {
        Self::new(StatusCode::NotFound)
    }

    /// Respuesta 200 OK vacía
    pub fn ok() -> Self {
        Self::new(StatusCode::Ok)
    }

    /// Respuesta 201 Created vacía
    pub fn created() -> Self {
        Self::new(StatusCode::Created)
    }

    /// Respuesta 200 con body de texto plano
    ///
    /// Establece `Content-Type: text/plain` y calcula `Content-Length`
    /// en bytes.
    ///
    /// # Ejemplo
    /// ```
    /// use fileserver::http::Response;
    ///
    /// let response = Response::text("abc");
    /// assert_eq!(response.headers().get("content-length"), Some("3"));
    /// assert_eq!(response.body(), b"abc");
    /// ```
    pub fn text(body: &str) -> Self {
        let mut response = Self::ok();
        response.headers.set("Content-Type", "text/plain");
        response.set_body(body.as_bytes().to_vec());
        response
    }

    /// Respuesta 200 con body binario
    ///
    /// Establece `Content-Type: application/octet-stream`. Se usa para
    /// servir archivos del blob store; el largo viene de los bytes
    /// realmente leídos (el store ya verificó que coinciden con el
    /// tamaño reportado por el filesystem).
    pub fn binary(body: Vec<u8>) -> Self {
        let mut response = Self::ok();
        response
            .headers
            .set("Content-Type", "application/octet-stream");
        response.set_body(body);
        response
    }

    /// Agrega o sobrescribe un header
    pub fn set_header(&mut self, name: &str, value: &str) {
        self.headers.set(name, value);
    }

    /// Reemplaza el body y recalcula `Content-Length`
    ///
    /// Es la operación que usa el transformador de encoding: después de
    /// comprimir, `Content-Length` debe reflejar el largo comprimido.
    pub fn set_body(&mut self, body: Vec<u8>) {
        self.headers
            .set("Content-Length", &body.len().to_string());
        self.body = body;
    }

    /// Convierte la respuesta a bytes listos para enviar por el socket
    ///
    /// Genera el formato completo HTTP/1.1:
    /// - Status line: `HTTP/1.1 200 OK\r\n`
    /// - Headers: `nombre: valor\r\n`
    /// - Línea vacía: `\r\n`
    /// - Body: contenido binario
    ///
    /// # Ejemplo
    /// ```
    /// use fileserver::http::Response;
    ///
    /// let bytes = Response::text("abc").to_bytes();
    /// let texto = String::from_utf8(bytes).unwrap();
    ///
    /// assert!(texto.starts_with("HTTP/1.1 200 OK\r\n"));
    /// assert!(texto.ends_with("\r\n\r\nabc"));
    /// ```
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut result = Vec::new();

        // 1. Status line
        let status_line = format!("HTTP/1.1 {}\r\n", self.status);
        result.extend_from_slice(status_line.as_bytes());

        // 2. Headers
        result.extend_from_slice(self.headers.to_wire().as_bytes());

        // 3. Línea vacía que separa headers del body
        result.extend_from_slice(b"\r\n");

        // 4. Body (si existe)
        result.extend_from_slice(&self.body);

        result
    }

    /// Obtiene el código de estado de la respuesta
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Obtiene una referencia a los headers
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Obtiene una referencia al body
    pub fn body(&self) -> &[u8] {
        &self.body
    }
}

impl Default for Response {
    /// El valor de arranque del pipeline es 404 vacío
    fn default() -> Self {
        Self::not_found()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_is_empty() {
        let response = Response::not_found();
        assert_eq!(response.status(), StatusCode::NotFound);
        assert!(response.headers().is_empty());
        assert!(response.body().is_empty());
    }

    #[test]
    fn test_default_is_not_found() {
        let response = Response::default();
        assert_eq!(response.status(), StatusCode::NotFound);
    }

    #[test]
    fn test_ok_is_empty() {
        let response = Response::ok();
        assert_eq!(response.status(), StatusCode::Ok);
        assert!(response.headers().is_empty());
        assert!(response.body().is_empty());
    }

    #[test]
    fn test_text_sets_headers() {
        let response = Response::text("Hello World");

        assert_eq!(response.status(), StatusCode::Ok);
        assert_eq!(response.headers().get("Content-Type"), Some("text/plain"));
        assert_eq!(response.headers().get("Content-Length"), Some("11"));
        assert_eq!(response.body(), b"Hello World");
    }

    #[test]
    fn test_binary_sets_headers() {
        let data = vec![0x89, 0x50, 0x4E, 0x47];
        let response = Response::binary(data.clone());

        assert_eq!(
            response.headers().get("Content-Type"),
            Some("application/octet-stream")
        );
        assert_eq!(response.headers().get("Content-Length"), Some("4"));
        assert_eq!(response.body(), &data[..]);
    }

    #[test]
    fn test_set_body_recalculates_content_length() {
        let mut response = Response::text("un body bastante largo");
        response.set_body(b"corto".to_vec());

        assert_eq!(response.headers().get("Content-Length"), Some("5"));
        assert_eq!(response.body(), b"corto");
    }

    #[test]
    fn test_to_bytes() {
        let response = Response::text("Test");

        let bytes = response.to_bytes();
        let text = String::from_utf8(bytes).unwrap();

        assert!(text.starts_with("HTTP/1.1 200 OK\r\n"));
        assert!(text.contains("content-type: text/plain\r\n"));
        assert!(text.contains("content-length: 4\r\n"));
        assert!(text.ends_with("\r\n\r\nTest"));
    }

    #[test]
    fn test_to_bytes_empty_response() {
        let bytes = Response::not_found().to_bytes();
        let text = String::from_utf8(bytes).unwrap();

        // Sin headers ni body: status line + línea vacía
        assert_eq!(text, "HTTP/1.1 404 Not Found\r\n\r\n");
    }

    #[test]
    fn test_to_bytes_created() {
        let bytes = Response::created().to_bytes();
        let text = String::from_utf8(bytes).unwrap();

        assert_eq!(text, "HTTP/1.1 201 Created\r\n\r\n");
    }
}
