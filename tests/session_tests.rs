use actix_web::cookie::{time::Duration as CookieDuration, SameSite};
use gamedex_server::session::{
    decode_token, issue_token, removal_cookie, session_cookie, SESSION_COOKIE,
};

const SECRET: &str = "test-secret";

#[test]
fn token_roundtrip_preserves_identity() {
    let token = issue_token(SECRET, 2, 7, true).expect("issue token");
    let user = decode_token(SECRET, &token).expect("decode token");

    assert_eq!(user.user_id, 7);
    assert!(user.is_admin);
}

#[test]
fn token_roundtrip_non_admin() {
    let token = issue_token(SECRET, 2, 3, false).expect("issue token");
    let user = decode_token(SECRET, &token).expect("decode token");

    assert_eq!(user.user_id, 3);
    assert!(!user.is_admin);
}

#[test]
fn wrong_secret_is_rejected() {
    let token = issue_token(SECRET, 2, 1, true).expect("issue token");
    assert!(decode_token("other-secret", &token).is_none());
}

#[test]
fn expired_token_is_rejected() {
    // An hour past expiry, well beyond the decoder's leeway.
    let token = issue_token(SECRET, -1, 1, true).expect("issue token");
    assert!(decode_token(SECRET, &token).is_none());
}

#[test]
fn tampered_token_is_rejected() {
    let mut token = issue_token(SECRET, 2, 1, true).expect("issue token");
    token.push('x');
    assert!(decode_token(SECRET, &token).is_none());
}

#[test]
fn garbage_token_is_rejected() {
    assert!(decode_token(SECRET, "not.a.token").is_none());
    assert!(decode_token(SECRET, "").is_none());
}

#[test]
fn session_cookie_is_cross_site() {
    let cookie = session_cookie("tok".into(), 2);

    assert_eq!(cookie.name(), SESSION_COOKIE);
    assert_eq!(cookie.value(), "tok");
    assert_eq!(cookie.path(), Some("/"));
    assert_eq!(cookie.secure(), Some(true));
    assert_eq!(cookie.http_only(), Some(true));
    assert_eq!(cookie.same_site(), Some(SameSite::None));
    assert_eq!(cookie.max_age(), Some(CookieDuration::hours(2)));
}

#[test]
fn removal_cookie_expires_immediately() {
    let cookie = removal_cookie();

    assert_eq!(cookie.name(), SESSION_COOKIE);
    assert_eq!(cookie.value(), "");
    assert_eq!(cookie.max_age(), Some(CookieDuration::ZERO));
}
