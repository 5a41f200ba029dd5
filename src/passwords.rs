use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::errors::AppError;

/// Deriva un hash argon2 (formato PHC, sal aleatoria por hash).
pub fn hash_clave(clave: &str) -> Result<String, AppError> {
    Argon2::default()
        .hash_password(clave.as_bytes(), &SaltString::generate(&mut OsRng))
        .map(|hash| hash.to_string())
        .map_err(|e| {
            log::error!("Failed to hash password: {}", e);
            AppError::PasswordError(e.to_string())
        })
}

/// Re-deriva y compara contra el hash almacenado. Un hash ilegible cuenta
/// como no-coincidencia, no como error del servidor.
pub fn verificar_clave(clave: &str, hash_almacenado: &str) -> bool {
    match PasswordHash::new(hash_almacenado) {
        Ok(parsed) => Argon2::default()
            .verify_password(clave.as_bytes(), &parsed)
            .is_ok(),
        Err(e) => {
            log::warn!("Stored password hash is not parseable: {}", e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{hash_clave, verificar_clave};

    #[test]
    fn el_hash_nunca_es_la_clave_en_texto_plano() {
        let hash = hash_clave("secret1").unwrap();
        assert_ne!(hash, "secret1");
        assert!(hash.starts_with("$argon2"));
    }

    #[test]
    fn verifica_la_clave_correcta_y_rechaza_la_incorrecta() {
        let hash = hash_clave("secret1").unwrap();
        assert!(verificar_clave("secret1", &hash));
        assert!(!verificar_clave("otra-clave", &hash));
    }

    #[test]
    fn un_hash_corrupto_no_verifica() {
        assert!(!verificar_clave("secret1", "no-es-un-hash"));
    }
}
