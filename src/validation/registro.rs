use crate::models::registro::Edad;

/// Validates every registration field.
///
/// # Arguments
///
/// * `nombre` - The submitted full name.
/// * `useremail` - The submitted email, which becomes the record key.
/// * `edad` - The submitted age, if the field was present at all.
///
/// # Returns
///
/// The full list of failures, in form order, so the client sees them all at
/// once. Empty when the registration is acceptable.
pub fn validar_registro(nombre: &str, useremail: &str, edad: Option<&Edad>) -> Vec<String> {
    let mut errores = Vec::new();

    if nombre.trim().is_empty() {
        errores.push("El nombre es obligatorio.".to_string());
    }

    match edad.and_then(Edad::as_numero) {
        Some(n) if n > 0 => {}
        _ => errores.push("Debes cubrir el campo edad y debe ser mayor que 0.".to_string()),
    }

    if !validar_email(useremail) {
        errores.push("Debes cubrir el campo email con un email válido.".to_string());
    }

    errores
}

/// Validates the shape of an email address.
///
/// Accepts `local@domain.tld`: letters, digits, `.`, `_` and `-` in the local
/// part; at least one domain label; a 2-6 letter top-level label.
///
/// # Arguments
///
/// * `email` - The address to check.
///
/// # Returns
///
/// `true` if the address matches the accepted shape.
pub fn validar_email(email: &str) -> bool {
    let Some((local, dominio)) = email.split_once('@') else {
        return false;
    };

    if local.is_empty()
        || !local
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
    {
        return false;
    }

    let Some((etiquetas, tld)) = dominio.rsplit_once('.') else {
        return false;
    };

    if etiquetas.is_empty()
        || !etiquetas
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-'))
    {
        return false;
    }

    (2..=6).contains(&tld.len()) && tld.chars().all(|c| c.is_ascii_alphabetic())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn well_formed_addresses_validate() {
        for email in [
            "user@domain.com",
            "user.name-1_a@sub.domain.org",
            "a@b.es",
            "mayus@DOMINIO.COM",
        ] {
            assert!(validar_email(email), "{email} should validate");
        }
    }

    #[test]
    fn malformed_addresses_do_not_validate() {
        for email in [
            "user@domain",
            "user.com",
            "@domain.com",
            "user@.com",
            "user@domain.",
            "user@domain.c",
            "user@domain.toolong",
            "user@domain.c0m",
            "us er@domain.com",
            "",
        ] {
            assert!(!validar_email(email), "{email} should not validate");
        }
    }

    #[test]
    fn all_failures_are_reported_together() {
        let errores = validar_registro("", "no-es-email", None);
        assert_eq!(errores.len(), 3);
        assert!(errores[0].contains("nombre"));
        assert!(errores[1].contains("edad"));
        assert!(errores[2].contains("email"));
    }

    #[test]
    fn age_must_be_a_positive_integer() {
        let edad_cero = Edad::Numero(0);
        let errores = validar_registro("Ana", "ana@example.com", Some(&edad_cero));
        assert_eq!(errores.len(), 1);

        let edad_texto = Edad::Texto("28".to_string());
        assert!(validar_registro("Ana", "ana@example.com", Some(&edad_texto)).is_empty());

        let edad_negativa = Edad::Texto("-3".to_string());
        assert_eq!(
            validar_registro("Ana", "ana@example.com", Some(&edad_negativa)).len(),
            1
        );
    }
}
