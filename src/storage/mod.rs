//! # Blob Store
//! src/storage/mod.rs
//!
//! Colaborador de archivos para las rutas `/files/`: un almacén
//! nombre → bytes respaldado por un directorio base configurable.
//!
//! El directorio base se inyecta por constructor; ningún código de este
//! módulo lee estado global del proceso.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Errores de acceso al blob store
#[derive(Debug)]
pub enum BlobError {
    /// El blob no existe (GET /files/ → 404)
    NotFound(String),

    /// Nombre con separadores de path o ".." (rechazado sin tocar disco)
    InvalidName(String),

    /// Cualquier otro fallo de I/O (→ 500)
    Io(std::io::Error),
}

impl std::fmt::Display for BlobError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BlobError::NotFound(name) => write!(f, "Blob not found: {}", name),
            BlobError::InvalidName(name) => write!(f, "Invalid blob name: {}", name),
            BlobError::Io(e) => write!(f, "Blob I/O error: {}", e),
        }
    }
}

impl std::error::Error for BlobError {}

/// Almacén de blobs sobre un directorio del filesystem
#[derive(Debug, Clone)]
pub struct BlobStore {
    /// Directorio base donde viven los blobs
    base_dir: PathBuf,
}

impl BlobStore {
    /// Crea un store enraizado en `base_dir`
    ///
    /// No valida que el directorio exista: se reporta como error de I/O
    /// recién al leer o escribir.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Directorio base configurado
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Lee un blob completo
    ///
    /// Verifica que la cantidad de bytes leídos coincida con el tamaño
    /// que reporta el filesystem; una discrepancia (archivo mutado a
    /// mitad de lectura) se reporta como error de I/O en vez de servir
    /// contenido truncado.
    pub fn read(&self, name: &str) -> Result<Vec<u8>, BlobError> {
        validate_name(name)?;
        let path = self.base_dir.join(name);

        let mut file = match fs::File::open(&path) {
            Ok(f) => f,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(BlobError::NotFound(name.to_string()));
            }
            Err(e) => return Err(BlobError::Io(e)),
        };

        let declared_len = file.metadata().map_err(BlobError::Io)?.len();

        let mut contents = Vec::with_capacity(declared_len as usize);
        file.read_to_end(&mut contents).map_err(BlobError::Io)?;

        if contents.len() as u64 != declared_len {
            return Err(BlobError::Io(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                format!(
                    "blob {} changed size during read: expected {} bytes, read {}",
                    name,
                    declared_len,
                    contents.len()
                ),
            )));
        }

        Ok(contents)
    }

    /// Crea o sobrescribe un blob con los bytes dados
    pub fn write(&self, name: &str, contents: &[u8]) -> Result<(), BlobError> {
        validate_name(name)?;
        let path = self.base_dir.join(name);
        fs::write(path, contents).map_err(BlobError::Io)
    }
}

/// Valida el nombre de un blob (seguridad básica)
///
/// Un nombre no puede escaparse del directorio base.
fn validate_name(name: &str) -> Result<(), BlobError> {
    if name.is_empty() || name.contains("..") || name.contains('/') || name.contains('\\') {
        return Err(BlobError::InvalidName(name.to_string()));
    }
    Ok(())
}
