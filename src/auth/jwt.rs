use jsonwebtoken::{decode, DecodingKey, Validation};
use tracing::debug;

use super::claims::Claims;
use crate::config::JwtConfig;

/// Verifies an HS256 access token against the configured audience and,
/// when one is configured, issuer.
pub fn verify(cfg: &JwtConfig, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::default();
    validation.set_audience(std::slice::from_ref(&cfg.audience));
    if let Some(issuer) = &cfg.issuer {
        validation.set_issuer(std::slice::from_ref(issuer));
    }
    let decoding = DecodingKey::from_secret(cfg.secret.as_bytes());
    let data = decode::<Claims>(token, &decoding, &validation)?;
    debug!(user_id = %data.claims.sub, "jwt verified");
    Ok(data.claims)
}


#[cfg(test)]
mod tests {
    use super::testing::sign;
    use super::*;
    use time::Duration;
    use uuid::Uuid;

    fn cfg(secret: &str, audience: &str, issuer: Option<&str>) -> JwtConfig {
        JwtConfig {
            secret: secret.into(),
            audience: audience.into(),
            issuer: issuer.map(String::from),
        }
    }

    #[test]
    fn accepts_token_from_same_secret() {
        let cfg = cfg("dev-secret", "authenticated", None);
        let user_id = Uuid::new_v4();
        let token = sign(&cfg, user_id, Duration::minutes(5));
        let claims = verify(&cfg, &token).expect("verify token");
        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.aud, "authenticated");
    }

    #[test]
    fn rejects_wrong_secret_or_audience() {
        let good = cfg("same-secret", "authenticated", None);
        let token = sign(&good, Uuid::new_v4(), Duration::minutes(5));
        assert!(verify(&cfg("other-secret", "authenticated", None), &token).is_err());
        assert!(verify(&cfg("same-secret", "anon", None), &token).is_err());
    }

    #[test]
    fn checks_issuer_only_when_configured() {
        let issued = cfg("s", "authenticated", Some("https://auth.example"));
        let token = sign(&issued, Uuid::new_v4(), Duration::minutes(5));
        assert!(verify(&cfg("s", "authenticated", None), &token).is_ok());
        assert!(verify(&cfg("s", "authenticated", Some("someone-else")), &token).is_err());
    }

    #[test]
    fn rejects_expired_token() {
        let cfg = cfg("s", "authenticated", None);
        let token = sign(&cfg, Uuid::new_v4(), Duration::hours(-1));
        assert!(verify(&cfg, &token).is_err());
    }
}
