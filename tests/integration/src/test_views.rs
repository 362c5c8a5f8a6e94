//! Versioned view integration tests against the `api1` and `api2` subdomains.

#[cfg(test)]
mod tests {
    use serde_json::Value;

    use crate::{client, create_test_user, subdomain_client};

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_serve_raw_records_on_api1() {
        let id = create_test_user(&client(), "viewone").await;

        let (client, base) = subdomain_client("api1");
        let resp = client
            .get(format!("{base}/users"))
            .send()
            .await
            .expect("get");

        assert_eq!(resp.status(), 200);
        assert_eq!(
            resp.headers()
                .get("content-type")
                .and_then(|v| v.to_str().ok()),
            Some("application/json"),
        );

        let users: Value = resp.json().await.expect("json body");
        let user = users
            .as_array()
            .expect("array")
            .iter()
            .find(|u| u["first_name"].as_str().is_some_and(|n| n.to_lowercase() == id))
            .expect("created user present");
        assert_eq!(user["last_name"], "Tester");
        assert!(user.get("full_name").is_none());
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_serve_condensed_records_on_api2() {
        let id = create_test_user(&client(), "viewtwo").await;

        let (client, base) = subdomain_client("api2");
        let resp = client
            .get(format!("{base}/users"))
            .send()
            .await
            .expect("get");

        assert_eq!(resp.status(), 200);
        let users: Value = resp.json().await.expect("json body");
        let user = users
            .as_array()
            .expect("array")
            .iter()
            .find(|u| {
                u["full_name"]
                    .as_str()
                    .is_some_and(|n| n.to_lowercase().starts_with(&id))
            })
            .expect("created user present");

        assert_eq!(user["age"], 33);
        assert!(user.get("first_name").is_none());
        assert!(user.get("last_name").is_none());
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_pin_json_on_versioned_views() {
        let (client, base) = subdomain_client("api1");
        let resp = client
            .get(format!("{base}/users"))
            .header("Accept", "application/xml")
            .send()
            .await
            .expect("get");

        // Views skip negotiation entirely.
        assert_eq!(resp.status(), 200);
        assert_eq!(
            resp.headers()
                .get("content-type")
                .and_then(|v| v.to_str().ok()),
            Some("application/json"),
        );
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_reject_writes_on_versioned_views() {
        let (client, base) = subdomain_client("api1");
        let resp = client
            .post(format!("{base}/users"))
            .header("Content-Type", "application/json")
            .body(r#"{"first_name":"Nope"}"#)
            .send()
            .await
            .expect("post");
        assert_eq!(resp.status(), 405);
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_404_item_paths_on_versioned_views() {
        let (client, base) = subdomain_client("api2");
        let resp = client
            .get(format!("{base}/users/john"))
            .send()
            .await
            .expect("get");
        assert_eq!(resp.status(), 404);
    }
}
