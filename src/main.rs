//! # fileserver - Entry Point
//! src/main.rs
//!
//! Punto de entrada del servidor HTTP/1.1.

use fileserver::config::Config;
use fileserver::server::Server;

fn main() {
    // Crear configuración desde CLI/env
    let config = Config::new();

    if let Err(e) = config.validate() {
        eprintln!("💥 Configuración inválida: {}", e);
        std::process::exit(1);
    }

    println!("=================================");
    println!("  fileserver HTTP/1.1");
    println!("=================================\n");
    println!("⚙️  Configuración:");
    println!("   Puerto: {}", config.port);
    println!("   Host: {}", config.host);
    println!("   Directorio: {}", config.directory);
    println!();

    // Crear el servidor
    let server = Server::new(config);

    // Iniciar el servidor (esto bloqueará el thread)
    if let Err(e) = server.run() {
        eprintln!("💥 Error fatal: {}", e);
        std::process::exit(1);
    }
}
