//! # Sistema de Routing
//! src/router/mod.rs
//!
//! Este módulo implementa el router que mapea (método, patrón de path)
//! a handlers específicos.
//!
//! ## Arquitectura
//!
//! ```text
//! Request → Router → Handler → Response
//! ```
//!
//! La tabla se recorre en orden de registro y gana la primera entrada
//! que matchea. Si ninguna matchea, el resultado es 404 Not Found.
//! El router no guarda estado entre requests: cada despacho es una
//! función pura del request (más el blob store para las rutas /files/).

use crate::handlers;
use crate::http::{Method, Request, Response};
use crate::storage::BlobStore;

/// Tipo de función handler
///
/// Un handler recibe el Request y el blob store, y retorna una Response
pub type Handler = fn(&Request, &BlobStore) -> Response;

/// Patrón de matching sobre el path del request
#[derive(Debug, Clone)]
enum Pattern {
    /// El path debe ser exactamente igual
    Exact(String),

    /// El path debe empezar con el prefijo
    Prefix(String),
}

impl Pattern {
    fn matches(&self, path: &str) -> bool {
        match self {
            Pattern::Exact(p) => p == path,
            Pattern::Prefix(p) => path.starts_with(p.as_str()),
        }
    }
}

/// Entrada de la tabla de rutas
struct Route {
    /// Filtro de método; `None` acepta cualquier método
    method: Option<Method>,
    pattern: Pattern,
    handler: Handler,
}

/// Router con la tabla fija de rutas del servidor
pub struct Router {
    routes: Vec<Route>,
    store: BlobStore,
}

impl Router {
    /// Crea el router con la tabla de rutas del servidor
    ///
    /// El blob store se inyecta acá y queda disponible para los
    /// handlers de `/files/`.
    ///
    /// # Ejemplo
    /// ```
    /// use fileserver::router::Router;
    /// use fileserver::storage::BlobStore;
    ///
    /// let router = Router::new(BlobStore::new("./data"));
    /// ```
    pub fn new(store: BlobStore) -> Self {
        let mut router = Self {
            routes: Vec::new(),
            store,
        };

        // Tabla de rutas: se evalúa en este orden, primera coincidencia gana
        router.register(None, Pattern::Exact("/".to_string()), handlers::root_handler);
        router.register(
            None,
            Pattern::Exact("/user-agent".to_string()),
            handlers::user_agent_handler,
        );
        router.register(
            None,
            Pattern::Prefix("/echo/".to_string()),
            handlers::echo_handler,
        );
        router.register(
            Some(Method::GET),
            Pattern::Prefix("/files/".to_string()),
            handlers::files_get_handler,
        );
        router.register(
            Some(Method::POST),
            Pattern::Prefix("/files/".to_string()),
            handlers::files_post_handler,
        );

        router
    }

    /// Registra una ruta con su handler
    fn register(&mut self, method: Option<Method>, pattern: Pattern, handler: Handler) {
        self.routes.push(Route {
            method,
            pattern,
            handler,
        });
    }

    /// Encuentra y ejecuta el handler apropiado para un request
    ///
    /// Si ninguna ruta matchea, retorna 404 Not Found.
    ///
    /// # Ejemplo
    /// ```
    /// use fileserver::http::{Request, StatusCode};
    /// use fileserver::router::Router;
    /// use fileserver::storage::BlobStore;
    ///
    /// let router = Router::new(BlobStore::new("./data"));
    ///
    /// let raw = b"GET /echo/hola HTTP/1.1\r\n\r\n";
    /// let request = Request::parse(raw).unwrap();
    /// let response = router.route(&request);
    ///
    /// assert_eq!(response.status(), StatusCode::Ok);
    /// assert_eq!(response.body(), b"hola");
    /// ```
    pub fn route(&self, request: &Request) -> Response {
        for route in &self.routes {
            if let Some(method) = route.method {
                if method != request.method() {
                    continue;
                }
            }
            if route.pattern.matches(request.path()) {
                return (route.handler)(request, &self.store);
            }
        }

        // No se encontró handler para este path
        Response::not_found()
    }
}
