//! # Servidor TCP Concurrente
//! src/server/tcp.rs
//!
//! Implementación del servidor TCP que maneja múltiples conexiones
//! simultáneas usando threads. Cada conexión se procesa en su propio
//! thread y transporta exactamente un request (sin keep-alive).
//!
//! ## Pipeline por conexión
//!
//! ```text
//! read loop → parse → dispatch → encoding → write → close
//! ```
//!
//! Ningún error de una conexión tumba el proceso: los errores de parseo
//! responden 400 y cierran; los errores de socket se loguean y terminan
//! solo ese thread. El accept loop sigue corriendo.

use crate::config::Config;
use crate::encoding;
use crate::http::request::find_header_end;
use crate::http::{Request, Response, StatusCode};
use crate::router::Router;
use crate::storage::BlobStore;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Tamaño de cada lectura del socket
const READ_CHUNK: usize = 8192;

/// Tamaño máximo de un request completo (headers + body)
const MAX_REQUEST_BYTES: usize = 1024 * 1024;

/// Servidor HTTP/1.1 concurrente
pub struct Server {
    config: Config,
    router: Arc<Router>,
}

impl Server {
    /// Crea el servidor a partir de la configuración
    ///
    /// El blob store se construye acá con el directorio configurado y
    /// se inyecta al router; nada por debajo lee estado global.
    pub fn new(config: Config) -> Self {
        let store = BlobStore::new(config.directory.clone());
        Self {
            config,
            router: Arc::new(Router::new(store)),
        }
    }

    /// Inicia el servidor (bloquea el thread actual)
    ///
    /// Solo el fallo del bind es fatal; los errores por conexión se
    /// aíslan en su propio thread.
    pub fn run(&self) -> std::io::Result<()> {
        let address = self.config.address();
        println!("[*] Iniciando servidor en {}", address);

        let listener = TcpListener::bind(&address)?;
        println!("[+] Servidor escuchando en {}", address);
        println!("[*] Blob store: {}", self.config.directory);
        println!("[*] Modo concurrente: un thread por conexion\n");

        let timeout = self.config.connection_timeout();

        for stream in listener.incoming() {
            match stream {
                Ok(stream) => {
                    let router = Arc::clone(&self.router);

                    let peer_addr = stream
                        .peer_addr()
                        .map(|addr| addr.to_string())
                        .unwrap_or_else(|_| "unknown".to_string());

                    println!("   ✅ Nueva conexión desde: {}", peer_addr);

                    thread::spawn(move || {
                        if let Err(e) = Self::handle_connection(stream, router, timeout) {
                            eprintln!("   ❌ Error en conexión de {}: {}", peer_addr, e);
                        }
                    });
                }
                Err(e) => {
                    eprintln!("   ❌ Error al aceptar conexión: {}", e);
                }
            }
        }

        Ok(())
    }

    /// Maneja una conexión completa: un request, una response, close
    fn handle_connection(
        mut stream: TcpStream,
        router: Arc<Router>,
        timeout: Option<Duration>,
    ) -> std::io::Result<()> {
        stream.set_read_timeout(timeout)?;
        stream.set_write_timeout(timeout)?;

        let buffer = read_request_bytes(&mut stream)?;

        if buffer.is_empty() {
            println!("   ✅ Conexión cerrada sin datos");
            return Ok(());
        }

        let response = match Request::parse(&buffer) {
            Ok(request) => {
                println!("   ✅ {} {}", request.method().as_str(), request.path());

                // 1. Despachar a la tabla de rutas
                let mut response = router.route(&request);

                // 2. Negociar y aplicar compresión sobre la response ya
                //    poblada (Content-Length debe quedar con el largo final)
                if let Some(codec) = encoding::negotiate(&request) {
                    if let Err(e) = encoding::apply(&mut response, codec) {
                        eprintln!("   ❌ Error comprimiendo response: {}", e);
                        response = Response::new(StatusCode::InternalServerError);
                    }
                }

                response
            }
            Err(e) => {
                println!("   ❌ Parse error: {}", e);
                Response::new(StatusCode::BadRequest)
            }
        };

        // 3. Serializar y enviar
        stream.write_all(&response.to_bytes())?;
        stream.flush()?;

        println!("   ✅ {}\n", response.status());

        Ok(())
    }
}

/// Lee un request completo del socket
///
/// Acumula lecturas hasta ver el delimitador `\r\n\r\n` de fin de
/// headers y, si el request declara `Content-Length`, sigue leyendo
/// hasta completar el body. Un solo `read` no alcanza para requests
/// grandes o para clientes que escriben de a pedazos.
///
/// EOF antes de completar devuelve lo acumulado: el parser reporta
/// después el error preciso (body incompleto, línea inválida, etc.).
fn read_request_bytes(stream: &mut TcpStream) -> std::io::Result<Vec<u8>> {
    let mut buffer = Vec::new();
    let mut chunk = [0u8; READ_CHUNK];
    let mut header_end = None;

    loop {
        let bytes_read = stream.read(&mut chunk)?;
        if bytes_read == 0 {
            // EOF del peer
            break;
        }
        buffer.extend_from_slice(&chunk[..bytes_read]);

        if buffer.len() > MAX_REQUEST_BYTES {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("request exceeds {} bytes", MAX_REQUEST_BYTES),
            ));
        }

        if header_end.is_none() {
            header_end = find_header_end(&buffer);
        }

        if let Some(end) = header_end {
            let body_needed = content_length_from_head(&buffer[..end]);
            // El Content-Length viene del cliente: la suma se satura y un
            // total que excede el máximo corta acá (el parser reporta
            // después body incompleto → 400)
            let total_needed = end.saturating_add(4).saturating_add(body_needed);
            if total_needed > MAX_REQUEST_BYTES || buffer.len() >= total_needed {
                break;
            }
        }
    }

    Ok(buffer)
}

/// Extrae `Content-Length` del bloque crudo de headers
///
/// Se usa solo para saber cuántos bytes de body esperar en el read
/// loop; el parser valida el header de verdad después. Ausente o
/// ilegible cuenta como 0 (el parser reportará el problema). Con
/// headers duplicados gana la última ocurrencia, igual que en el
/// `HeaderMap` que usa el parser.
fn content_length_from_head(head: &[u8]) -> usize {
    let head_str = String::from_utf8_lossy(head);
    let mut length = 0;

    for line in head_str.split("\r\n").skip(1) {
        if let Some(colon_pos) = line.find(':') {
            if line[..colon_pos].trim().eq_ignore_ascii_case("content-length") {
                length = line[colon_pos + 1..].trim().parse().unwrap_or(0);
            }
        }
    }

    length
}
