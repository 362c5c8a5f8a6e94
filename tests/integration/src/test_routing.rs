//! Routing integration tests: banner, OPTIONS, method restrictions, and
//! unknown paths.

#[cfg(test)]
mod tests {
    use crate::{client, endpoint_url, user_url};

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_serve_banner_at_root() {
        let client = client();
        let resp = client.get(endpoint_url()).send().await.expect("get");
        assert_eq!(resp.status(), 200);
        assert!(!resp.text().await.expect("body").is_empty());
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_advertise_collection_methods() {
        let client = client();
        let resp = client
            .request(reqwest::Method::OPTIONS, format!("{}/users", endpoint_url()))
            .send()
            .await
            .expect("options");

        assert_eq!(resp.status(), 200);
        assert_eq!(
            resp.headers().get("allow").and_then(|v| v.to_str().ok()),
            Some("HEAD,GET,POST"),
        );
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_advertise_item_methods() {
        let client = client();
        let resp = client
            .request(reqwest::Method::OPTIONS, user_url("anyone"))
            .send()
            .await
            .expect("options");

        assert_eq!(resp.status(), 200);
        assert_eq!(
            resp.headers().get("allow").and_then(|v| v.to_str().ok()),
            Some("GET,PUT,PATCH,DELETE"),
        );
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_405_write_verbs_on_collection() {
        let client = client();

        let resp = client
            .put(format!("{}/users", endpoint_url()))
            .header("Content-Type", "application/json")
            .body("{}")
            .send()
            .await
            .expect("put");
        assert_eq!(resp.status(), 405);

        let resp = client
            .delete(format!("{}/users", endpoint_url()))
            .send()
            .await
            .expect("delete");
        assert_eq!(resp.status(), 405);
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_404_unknown_path() {
        let client = client();
        let resp = client
            .get(format!("{}/accounts", endpoint_url()))
            .send()
            .await
            .expect("get");
        assert_eq!(resp.status(), 404);
    }
}
