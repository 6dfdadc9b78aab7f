//! Client behaviour against a mocked platform API

use quickjoin_client::{
    ClientError, Credentials, LoginState, PlatformClient, SessionCookies, TwoFactorMethod,
    DEFAULT_USER_AGENT,
};
use quickjoin_engine::{ApiError, PlatformApi};
use quickjoin_types::{GroupId, ResolvedTarget, UserId, WorldId};
use serde_json::json;
use wiremock::matchers::{body_json, header, header_regex, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn client_for(server: &MockServer) -> PlatformClient {
    PlatformClient::new(&format!("{}/api/1", server.uri())).unwrap()
}

#[tokio::test]
async fn test_login_with_email_second_factor() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/1/auth/user"))
        .and(header("authorization", "Basic bWU6c2VjcmV0"))
        .and(header("user-agent", DEFAULT_USER_AGENT))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("set-cookie", "auth=authcookie_new; Path=/")
                .set_body_json(json!({ "requiresTwoFactorAuth": ["emailOtp"] })),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/1/auth/twofactorauth/emailotp/verify"))
        .and(body_json(json!({ "code": "123456" })))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("set-cookie", "twoFactorAuth=tfa_new; Path=/")
                .set_body_json(json!({ "verified": true })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server)
        .await
        .with_credentials(Credentials::new("me", "secret"));

    let state = client.login().await.unwrap();
    assert_eq!(
        state,
        LoginState::TwoFactorRequired(vec![TwoFactorMethod::EmailOtp])
    );

    let verified = client
        .verify_two_factor(TwoFactorMethod::EmailOtp, " 123456\n")
        .await
        .unwrap();
    assert!(verified);

    assert_eq!(
        client.session_cookies(),
        SessionCookies {
            auth: Some("authcookie_new".to_string()),
            two_factor_auth: Some("tfa_new".to_string()),
        }
    );
}

#[tokio::test]
async fn test_login_with_saved_cookies() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/1/auth/user"))
        .and(header_regex("cookie", "(^|; )auth=saved_auth(;|$)"))
        .and(header_regex("cookie", "(^|; )twoFactorAuth=saved_tfa(;|$)"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "id": "usr_me", "displayName": "Me", "friends": [] })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    client.restore_session(&SessionCookies {
        auth: Some("saved_auth".to_string()),
        two_factor_auth: Some("saved_tfa".to_string()),
    });

    match client.login().await.unwrap() {
        LoginState::LoggedIn(user) => assert_eq!(user.display_name, "Me"),
        other => panic!("unexpected {other:?}"),
    }
}

#[tokio::test]
async fn test_rejected_credentials() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/1/auth/user"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Missing Credentials"))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    assert!(matches!(
        client.login().await,
        Err(ClientError::Unauthorized(message)) if message.contains("Missing")
    ));
}

#[tokio::test]
async fn test_missing_records_are_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/1/worlds/wrld_gone"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/1/groups/grp_gone"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    assert!(client.get_world(&WorldId::new("wrld_gone")).await.unwrap().is_none());
    assert!(client.get_group(&GroupId::new("grp_gone")).await.unwrap().is_none());
}

#[tokio::test]
async fn test_records_are_decoded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/1/worlds/wrld_box"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "wrld_box",
            "name": "Box",
            "authorName": "Maker",
            "capacity": 16,
            "instances": [["1234~region(eu)", 3]]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/1/groups/grp_club/instances"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "instanceId": "99~group(grp_club)",
            "location": "wrld_box:99~group(grp_club)",
            "memberCount": 5,
            "world": { "id": "wrld_box", "name": "Box", "capacity": 16 }
        }])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/1/users/usr_friend"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "usr_friend",
            "displayName": "Friend",
            "location": "wrld_box:1234~region(eu)"
        })))
        .mount(&server)
        .await;

    let client = client_for(&server).await;

    let world = client.get_world(&WorldId::new("wrld_box")).await.unwrap().unwrap();
    assert_eq!(world.instance_candidates()[0].occupancy, Some(3));

    let instances = client
        .get_group_instances(&GroupId::new("grp_club"))
        .await
        .unwrap();
    assert_eq!(instances[0].member_count, Some(5));

    let user = client.get_user(&UserId::new("usr_friend")).await.unwrap().unwrap();
    assert_eq!(user.location.as_deref(), Some("wrld_box:1234~region(eu)"));
}

#[tokio::test]
async fn test_server_errors_map_to_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/1/groups/grp_busy/instances"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let err = client
        .get_group_instances(&GroupId::new("grp_busy"))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Status { status: 503, ref message } if message == "maintenance"));
}

#[tokio::test]
async fn test_invite_self_posts_location() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/1/invite/myself/to/wrld_box:1234~region(eu)"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "not_1" })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    client
        .invite_self(&ResolvedTarget::new(WorldId::new("wrld_box"), "1234~region(eu)"))
        .await
        .unwrap();
}
