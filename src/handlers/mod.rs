//! # Handlers de Rutas
//! src/handlers/mod.rs
//!
//! Implementación de los handlers del servidor:
//! - `/`: respuesta 200 vacía
//! - `/user-agent`: eco del header User-Agent
//! - `/echo/{texto}`: eco del resto del path
//! - GET `/files/{nombre}`: lectura del blob store
//! - POST `/files/{nombre}`: escritura del blob store
//!
//! Todos los handlers son funciones puras del request salvo los de
//! `/files/`, que son los únicos con efectos sobre el blob store.

use crate::http::{Request, Response, StatusCode};
use crate::storage::{BlobError, BlobStore};

/// Handler para `/`
///
/// Responde 200 OK sin headers ni body.
pub fn root_handler(_req: &Request, _store: &BlobStore) -> Response {
    Response::ok()
}

/// Handler para `/user-agent`
///
/// Responde el valor del header `User-Agent` como texto plano. Si el
/// cliente no lo mandó, el body es vacío (con `Content-Length: 0`).
///
/// # Ejemplo de response
/// ```text
/// HTTP/1.1 200 OK
/// content-type: text/plain
/// content-length: 11
///
/// curl/7.68.0
/// ```
pub fn user_agent_handler(req: &Request, _store: &BlobStore) -> Response {
    Response::text(req.header("User-Agent").unwrap_or(""))
}

/// Handler para `/echo/{texto}`
///
/// Responde el resto del path después de `/echo/` como texto plano.
pub fn echo_handler(req: &Request, _store: &BlobStore) -> Response {
    let echoed = req.path().strip_prefix("/echo/").unwrap_or("");
    Response::text(echoed)
}

/// Handler para GET `/files/{nombre}`
///
/// Lee el blob del store y lo responde como `application/octet-stream`.
/// Un blob inexistente (o un nombre inválido) es 404; cualquier otro
/// fallo de I/O es 500.
pub fn files_get_handler(req: &Request, store: &BlobStore) -> Response {
    let name = req.path().strip_prefix("/files/").unwrap_or("");

    match store.read(name) {
        Ok(contents) => Response::binary(contents),
        Err(BlobError::NotFound(_)) | Err(BlobError::InvalidName(_)) => Response::not_found(),
        Err(BlobError::Io(e)) => {
            eprintln!("[files] error leyendo {}: {}", name, e);
            Response::new(StatusCode::InternalServerError)
        }
    }
}

/// Handler para POST `/files/{nombre}`
///
/// Crea o sobrescribe el blob con el body del request. Éxito es 201;
/// un nombre inválido o un fallo de I/O es 500.
pub fn files_post_handler(req: &Request, store: &BlobStore) -> Response {
    let name = req.path().strip_prefix("/files/").unwrap_or("");

    match store.write(name, req.body()) {
        Ok(()) => Response::created(),
        Err(e) => {
            eprintln!("[files] error escribiendo {}: {}", name, e);
            Response::new(StatusCode::InternalServerError)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::atomic::{AtomicU32, Ordering};

    static DIR_SEQ: AtomicU32 = AtomicU32::new(0);

    fn temp_store() -> (BlobStore, std::path::PathBuf) {
        let dir = std::env::temp_dir().join(format!(
            "fileserver-handlers-test-{}-{}",
            std::process::id(),
            DIR_SEQ.fetch_add(1, Ordering::SeqCst)
        ));
        fs::create_dir_all(&dir).unwrap();
        (BlobStore::new(&dir), dir)
    }

    fn make_request(raw: &[u8]) -> Request {
        Request::parse(raw).unwrap()
    }

    #[test]
    fn test_root_handler() {
        let (store, dir) = temp_store();
        let request = make_request(b"GET / HTTP/1.1\r\n\r\n");

        let response = root_handler(&request, &store);
        assert_eq!(response.status(), StatusCode::Ok);
        assert!(response.body().is_empty());

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_user_agent_handler() {
        let (store, dir) = temp_store();
        let request =
            make_request(b"GET /user-agent HTTP/1.1\r\nUser-Agent: foobar/1.2.3\r\n\r\n");

        let response = user_agent_handler(&request, &store);
        assert_eq!(response.status(), StatusCode::Ok);
        assert_eq!(response.body(), b"foobar/1.2.3");
        assert_eq!(response.headers().get("Content-Type"), Some("text/plain"));

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_user_agent_handler_without_header() {
        let (store, dir) = temp_store();
        let request = make_request(b"GET /user-agent HTTP/1.1\r\n\r\n");

        let response = user_agent_handler(&request, &store);
        assert_eq!(response.status(), StatusCode::Ok);
        assert!(response.body().is_empty());
        assert_eq!(response.headers().get("Content-Length"), Some("0"));

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_echo_handler() {
        let (store, dir) = temp_store();
        let request = make_request(b"GET /echo/abc HTTP/1.1\r\n\r\n");

        let response = echo_handler(&request, &store);
        assert_eq!(response.status(), StatusCode::Ok);
        assert_eq!(response.body(), b"abc");
        assert_eq!(response.headers().get("Content-Length"), Some("3"));

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_files_get_existing() {
        let (store, dir) = temp_store();
        store.write("foo.txt", b"hello").unwrap();

        let request = make_request(b"GET /files/foo.txt HTTP/1.1\r\n\r\n");
        let response = files_get_handler(&request, &store);

        assert_eq!(response.status(), StatusCode::Ok);
        assert_eq!(response.body(), b"hello");
        assert_eq!(
            response.headers().get("Content-Type"),
            Some("application/octet-stream")
        );
        assert_eq!(response.headers().get("Content-Length"), Some("5"));

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_files_get_missing() {
        let (store, dir) = temp_store();

        let request = make_request(b"GET /files/nada.txt HTTP/1.1\r\n\r\n");
        let response = files_get_handler(&request, &store);

        assert_eq!(response.status(), StatusCode::NotFound);

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_files_get_traversal_is_404() {
        let (store, dir) = temp_store();

        let request = make_request(b"GET /files/../secreto HTTP/1.1\r\n\r\n");
        let response = files_get_handler(&request, &store);

        assert_eq!(response.status(), StatusCode::NotFound);

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_files_post_creates_blob() {
        let (store, dir) = temp_store();

        let request =
            make_request(b"POST /files/foo.txt HTTP/1.1\r\nContent-Length: 5\r\n\r\nhello");
        let response = files_post_handler(&request, &store);

        assert_eq!(response.status(), StatusCode::Created);
        assert_eq!(store.read("foo.txt").unwrap(), b"hello");

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_files_post_io_failure_is_500() {
        let store = BlobStore::new("/definitivamente/no/existe");
        let request =
            make_request(b"POST /files/foo.txt HTTP/1.1\r\nContent-Length: 5\r\n\r\nhello");

        let response = files_post_handler(&request, &store);
        assert_eq!(response.status(), StatusCode::InternalServerError);
    }
}
