//! # Mapa de Headers HTTP
//! src/http/headers.rs
//!
//! Almacén clave/valor para headers con búsqueda case-insensitive.
//!
//! HTTP define los nombres de headers como case-insensitive (RFC 7230 §3.2):
//! `Content-Type`, `content-type` y `CONTENT-TYPE` son el mismo header.
//! Normalizamos las claves a minúsculas al escribir, así la búsqueda es
//! un lookup directo en el `HashMap`.
//!
//! ## Semántica
//!
//! - Escribir dos veces la misma clave sobrescribe (gana el último valor)
//! - La ausencia de un header se representa con `None`, nunca es un error
//! - El orden de serialización no está garantizado

use std::collections::HashMap;

/// Mapa de headers HTTP con claves case-insensitive
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderMap {
    /// Claves normalizadas a minúsculas → valor
    entries: HashMap<String, String>,
}

impl HeaderMap {
    /// Crea un mapa vacío
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Guarda un header, sobrescribiendo el valor anterior si existía
    ///
    /// La clave se normaliza a minúsculas antes de guardarse.
    ///
    /// # Ejemplo
    /// ```
    /// use fileserver::http::HeaderMap;
    ///
    /// let mut headers = HeaderMap::new();
    /// headers.set("Content-Type", "text/plain");
    /// headers.set("content-type", "application/json"); // sobrescribe
    ///
    /// assert_eq!(headers.get("CONTENT-TYPE"), Some("application/json"));
    /// ```
    pub fn set(&mut self, name: &str, value: &str) {
        self.entries
            .insert(name.to_ascii_lowercase(), value.to_string());
    }

    /// Busca un header sin importar mayúsculas/minúsculas
    ///
    /// Retorna `None` si el header no existe.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .get(&name.to_ascii_lowercase())
            .map(|s| s.as_str())
    }

    /// Cantidad de headers almacenados
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Verifica si el mapa está vacío
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Itera sobre los pares (nombre, valor)
    ///
    /// El orden de iteración no está especificado.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Serializa los headers a formato de wire
    ///
    /// Produce una línea `nombre: valor\r\n` por entrada. El orden de las
    /// líneas no es estable entre llamadas.
    ///
    /// # Ejemplo
    /// ```
    /// use fileserver::http::HeaderMap;
    ///
    /// let mut headers = HeaderMap::new();
    /// headers.set("Content-Length", "5");
    ///
    /// assert_eq!(headers.to_wire(), "content-length: 5\r\n");
    /// ```
    pub fn to_wire(&self) -> String {
        let mut wire = String::new();
        for (name, value) in &self.entries {
            wire.push_str(name);
            wire.push_str(": ");
            wire.push_str(value);
            wire.push_str("\r\n");
        }
        wire
    }
}
