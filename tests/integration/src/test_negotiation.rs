//! Content negotiation integration tests: Accept handling on reads and
//! Content-Type validation on writes.

#[cfg(test)]
mod tests {
    use crate::{client, create_test_user, endpoint_url, user_url};

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_serve_xml_when_asked() {
        let client = client();
        let id = create_test_user(&client, "xmlread").await;

        let resp = client
            .get(user_url(&id))
            .header("Accept", "application/xml")
            .send()
            .await
            .expect("get");

        assert_eq!(resp.status(), 200);
        assert_eq!(
            resp.headers()
                .get("content-type")
                .and_then(|v| v.to_str().ok()),
            Some("application/xml"),
        );

        let body = resp.text().await.expect("body");
        assert!(body.starts_with(&format!("<{id}>")));
        assert!(body.contains("<last_name>Tester</last_name>"));
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_default_to_json_for_wildcard_accepts() {
        let client = client();

        for accept in ["*/*", "application/*", "application/json"] {
            let resp = client
                .get(format!("{}/users", endpoint_url()))
                .header("Accept", accept)
                .send()
                .await
                .expect("get");
            assert_eq!(resp.status(), 200, "accept {accept}");
            assert_eq!(
                resp.headers()
                    .get("content-type")
                    .and_then(|v| v.to_str().ok()),
                Some("application/json"),
                "accept {accept}",
            );
        }
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_406_with_supported_list_on_unacceptable() {
        let client = client();
        let resp = client
            .get(format!("{}/users", endpoint_url()))
            .header("Accept", "text/html")
            .send()
            .await
            .expect("get");

        assert_eq!(resp.status(), 406);
        assert_eq!(
            resp.headers()
                .get("content-type")
                .and_then(|v| v.to_str().ok()),
            Some("text/plain"),
        );
        assert_eq!(
            resp.text().await.expect("body"),
            "application/json, application/xml",
        );
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_delete_regardless_of_accept() {
        let client = client();
        let id = create_test_user(&client, "acceptdel").await;

        let resp = client
            .delete(user_url(&id))
            .header("Accept", "text/nonsense")
            .send()
            .await
            .expect("delete");
        assert_eq!(resp.status(), 204);
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_serve_banner_regardless_of_accept() {
        let client = client();
        let resp = client
            .get(endpoint_url())
            .header("Accept", "text/plain")
            .send()
            .await
            .expect("get");
        assert_eq!(resp.status(), 200);
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_advertise_options_regardless_of_accept() {
        let client = client();
        let resp = client
            .request(reqwest::Method::OPTIONS, format!("{}/users", endpoint_url()))
            .header("Accept", "text/nonsense")
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
    async fn test_should_create_regardless_of_accept() {
        let client = client();
        let name = crate::test_user_name("AcceptPost");

        let resp = client
            .post(format!("{}/users", endpoint_url()))
            .header("Content-Type", "application/json")
            .header("Accept", "text/nonsense")
            .json(&serde_json::json!({
                "first_name": name,
                "last_name": "Tester",
                "age": 33,
            }))
            .send()
            .await
            .expect("post");
        assert_eq!(resp.status(), 201);
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_415_on_xml_post() {
        let client = client();
        let resp = client
            .post(format!("{}/users", endpoint_url()))
            .header("Content-Type", "application/xml")
            .body(r#"{"first_name":"Nope"}"#)
            .send()
            .await
            .expect("post");
        assert_eq!(resp.status(), 415);
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_415_on_missing_content_type_for_write() {
        let client = client();
        let resp = client
            .post(format!("{}/users", endpoint_url()))
            .body(r#"{"first_name":"Nope"}"#)
            .send()
            .await
            .expect("post");
        assert_eq!(resp.status(), 415);
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_accept_xml_content_type_on_put_with_json_body() {
        let client = client();
        let id = create_test_user(&client, "xmlput").await;

        // The declared type is validated, but bodies are always JSON.
        let resp = client
            .put(user_url(&id))
            .header("Content-Type", "application/xml")
            .body(format!(
                r#"{{"first_name":"{id}","last_name":"Mixed","age":2}}"#
            ))
            .send()
            .await
            .expect("put");
        assert_eq!(resp.status(), 204);
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_reject_text_xml_content_type() {
        let client = client();
        let id = create_test_user(&client, "textxml").await;

        let resp = client
            .put(user_url(&id))
            .header("Content-Type", "text/xml")
            .body("{}")
            .send()
            .await
            .expect("put");
        assert_eq!(resp.status(), 415);
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_400_on_malformed_json_body() {
        let client = client();
        let resp = client
            .post(format!("{}/users", endpoint_url()))
            .header("Content-Type", "application/json")
            .body("{not json")
            .send()
            .await
            .expect("post");
        assert_eq!(resp.status(), 400);
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_render_error_body_in_xml() {
        let client = client();
        let resp = client
            .get(user_url("nobodyhasthisname"))
            .header("Accept", "application/xml")
            .send()
            .await
            .expect("get");

        assert_eq!(resp.status(), 404);
        let body = resp.text().await.expect("body");
        assert!(body.starts_with("<message>"));
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_answer_head_with_negotiated_type_only() {
        let client = client();
        let resp = client
            .head(format!("{}/users", endpoint_url()))
            .header("Accept", "application/xml")
            .send()
            .await
            .expect("head");

        assert_eq!(resp.status(), 200);
        assert_eq!(
            resp.headers()
                .get("content-type")
                .and_then(|v| v.to_str().ok()),
            Some("application/xml"),
        );
        assert!(resp.text().await.expect("body").is_empty());
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_default_to_json_without_accept() {
        let client = client();
        let resp = client
            .get(format!("{}/users", endpoint_url()))
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

        let users: serde_json::Value = resp.json().await.expect("json body");
        assert!(users.is_array());
    }
}
