//! # Parsing de Requests HTTP/1.1
//! src/http/request.rs
//!
//! Este módulo implementa el parser de requests desde cero.
//!
//! ## Formato de un Request HTTP/1.1
//!
//! ```text
//! POST /files/notas.txt HTTP/1.1\r\n
//! Host: localhost:4221\r\n
//! Content-Length: 5\r\n
//! \r\n
//! hello
//! ```
//!
//! ## Componentes
//!
//! 1. **Request Line**: `METHOD /path HTTP/1.1` (exactamente 3 tokens)
//! 2. **Headers**: Pares `Name: Value` (uno por línea)
//! 3. **Empty Line**: `\r\n` que separa headers del body
//! 4. **Body**: exactamente `Content-Length` bytes; vacío si el header falta
//!
//! La versión almacenada no incluye el prefijo `HTTP/`: para
//! `GET / HTTP/1.1` el campo `version` es `"1.1"`.

use super::HeaderMap;

/// Métodos HTTP soportados
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// GET - Obtener un recurso
    GET,

    /// POST - Enviar datos a un recurso
    POST,
}

impl Method {
    /// Parsea un método HTTP desde un string
    ///
    /// # Errores
    ///
    /// Retorna error si el método no es soportado
    fn from_str(s: &str) -> Result<Self, ParseError> {
        match s {
            "GET" => Ok(Method::GET),
            "POST" => Ok(Method::POST),
            _ => Err(ParseError::UnsupportedMethod(s.to_string())),
        }
    }

    /// Convierte el método a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::GET => "GET",
            Method::POST => "POST",
        }
    }
}

/// Representa un request HTTP parseado
///
/// Inmutable después de construirse: solo expone accessors.
#[derive(Debug, Clone)]
pub struct Request {
    /// Método HTTP (GET, POST)
    method: Method,

    /// Path de la petición (ej: "/echo/abc"). Si el cliente mandó un
    /// query string, queda dentro del path sin descomponer.
    path: String,

    /// Versión HTTP sin el prefijo "HTTP/" (ej: "1.1")
    version: String,

    /// Headers del request
    headers: HeaderMap,

    /// Body del request
    body: Vec<u8>,
}

/// Errores que pueden ocurrir durante el parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Request vacío
    EmptyRequest,

    /// Formato inválido de la request line (tokens de más o de menos)
    InvalidRequestLine,

    /// Método HTTP no soportado
    UnsupportedMethod(String),

    /// Token de versión sin el prefijo "HTTP/"
    InvalidHttpVersion(String),

    /// Header sin separador ':'
    InvalidHeader(String),

    /// El body tiene menos bytes que lo declarado en Content-Length
    IncompleteBody { declared: usize, received: usize },
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::EmptyRequest => write!(f, "Empty request"),
            ParseError::InvalidRequestLine => write!(f, "Invalid request line format"),
            ParseError::UnsupportedMethod(m) => write!(f, "Unsupported HTTP method: {}", m),
            ParseError::InvalidHttpVersion(v) => write!(f, "Invalid HTTP version: {}", v),
            ParseError::InvalidHeader(h) => write!(f, "Invalid header: {}", h),
            ParseError::IncompleteBody { declared, received } => write!(
                f,
                "Incomplete body: Content-Length {} but received {} bytes",
                declared, received
            ),
        }
    }
}

impl std::error::Error for ParseError {}

impl Request {
    /// Parsea un request HTTP desde bytes
    ///
    /// El buffer debe contener el request completo (ver el read loop en
    /// `server::tcp`, que acumula hasta tener headers + body).
    ///
    /// # Retorna
    ///
    /// * `Ok(Request)` - Request parseado exitosamente
    /// * `Err(ParseError)` - Error durante el parsing
    ///
    /// # Ejemplo
    ///
    /// ```
    /// use fileserver::http::Request;
    ///
    /// let raw = b"GET /echo/abc HTTP/1.1\r\nHost: localhost\r\n\r\n";
    /// let request = Request::parse(raw).unwrap();
    ///
    /// assert_eq!(request.path(), "/echo/abc");
    /// assert_eq!(request.version(), "1.1");
    /// ```
    pub fn parse(buffer: &[u8]) -> Result<Self, ParseError> {
        // Separar la sección de headers del body en el primer \r\n\r\n.
        // El body puede ser binario, así que solo la parte de headers se
        // interpreta como texto.
        let (head, raw_body) = split_head_body(buffer);

        let head_str =
            std::str::from_utf8(head).map_err(|_| ParseError::InvalidRequestLine)?;

        if head_str.trim().is_empty() {
            return Err(ParseError::EmptyRequest);
        }

        let mut lines = head_str.split("\r\n");

        // 1. Parsear la request line (primera línea)
        let request_line = lines.next().ok_or(ParseError::InvalidRequestLine)?;
        let (method, path, version) = Self::parse_request_line(request_line)?;

        // 2. Parsear headers (resto de líneas)
        let headers = Self::parse_headers(lines)?;

        // 3. Parsear body según Content-Length
        let body = Self::parse_body(&headers, raw_body)?;

        Ok(Request {
            method,
            path,
            version,
            headers,
            body,
        })
    }

    /// Parsea la request line (primera línea del request)
    ///
    /// Formato: `GET /path HTTP/1.1`. Espacios de más dentro del path
    /// producen más de 3 tokens y se rechazan como línea inválida.
    fn parse_request_line(line: &str) -> Result<(Method, String, String), ParseError> {
        let parts: Vec<&str> = line.split(' ').collect();

        // Debe tener exactamente 3 partes: METHOD PATH VERSION
        if parts.len() != 3 || parts.iter().any(|p| p.is_empty()) {
            return Err(ParseError::InvalidRequestLine);
        }

        // Parsear método
        let method = Method::from_str(parts[0])?;

        // El path se guarda tal cual (query string incluido)
        let path = parts[1].to_string();

        // El token de versión debe ser "HTTP/<version>"; guardamos solo
        // la parte después del prefijo
        let version = parts[2]
            .strip_prefix("HTTP/")
            .ok_or_else(|| ParseError::InvalidHttpVersion(parts[2].to_string()))?
            .to_string();

        Ok((method, path, version))
    }

    /// Parsea los headers HTTP
    ///
    /// Cada header tiene formato: "Name: Value". El nombre se normaliza
    /// a minúsculas (lo hace el `HeaderMap`) y el valor se recorta de
    /// espacios.
    fn parse_headers<'a>(lines: impl Iterator<Item = &'a str>) -> Result<HeaderMap, ParseError> {
        let mut headers = HeaderMap::new();

        for line in lines {
            // La línea vacía marca el fin de los headers
            if line.trim().is_empty() {
                break;
            }

            // Buscar el separador ':'
            if let Some(colon_pos) = line.find(':') {
                let name = line[..colon_pos].trim();
                let value = line[colon_pos + 1..].trim();
                headers.set(name, value);
            } else {
                // Header sin ':' es inválido
                return Err(ParseError::InvalidHeader(line.to_string()));
            }
        }

        Ok(headers)
    }

    /// Parsea el cuerpo del request
    ///
    /// Sin `Content-Length` el body es vacío. Con `Content-Length` se
    /// toman exactamente esos bytes; si llegaron menos es un error
    /// (request truncado).
    fn parse_body(headers: &HeaderMap, raw_body: &[u8]) -> Result<Vec<u8>, ParseError> {
        let declared: usize = match headers.get("Content-Length") {
            Some(v) => v
                .parse()
                .map_err(|_| ParseError::InvalidHeader(format!("Content-Length: {}", v)))?,
            None => return Ok(Vec::new()),
        };

        if raw_body.len() < declared {
            return Err(ParseError::IncompleteBody {
                declared,
                received: raw_body.len(),
            });
        }

        Ok(raw_body[..declared].to_vec())
    }

    // === Métodos públicos para acceder a los campos ===

    /// Obtiene el método HTTP del request
    pub fn method(&self) -> Method {
        self.method
    }

    /// Obtiene el path del request
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Obtiene la versión HTTP (sin el prefijo "HTTP/")
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Obtiene todos los headers
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Obtiene un header específico (case-insensitive)
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)
    }

    /// Obtiene el body del request
    pub fn body(&self) -> &[u8] {
        &self.body
    }
}

/// Separa el buffer en (sección de headers, body crudo)
///
/// El delimitador `\r\n\r\n` no se incluye en ninguna de las dos partes.
/// Si no hay delimitador todo el buffer es sección de headers.
fn split_head_body(buffer: &[u8]) -> (&[u8], &[u8]) {
    match find_header_end(buffer) {
        Some(pos) => (&buffer[..pos], &buffer[pos + 4..]),
        None => (buffer, &[][..]),
    }
}

/// Busca la posición del delimitador `\r\n\r\n` entre headers y body
pub(crate) fn find_header_end(buffer: &[u8]) -> Option<usize> {
    buffer.windows(4).position(|w| w == b"\r\n\r\n")
}
