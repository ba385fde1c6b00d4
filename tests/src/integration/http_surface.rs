//! # HTTP Surface Flows
//!
//! The full stack through the router: an admin dashboard's view of the
//! bridge, from submission to settlement, speaking only JSON over HTTP.

#[cfg(test)]
mod tests {
    use crate::support::{address_of, admin_ledger, sign_approval, signing_key};
    use ab_04_api_gateway::{build_router, ApiConfig};
    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use axum::Router;
    use std::time::Duration;
    use tower::ServiceExt;

    const NEVER: Duration = Duration::from_secs(600);

    async fn call(
        router: &Router,
        method: Method,
        uri: &str,
        body: Option<serde_json::Value>,
    ) -> (StatusCode, serde_json::Value) {
        let request = match body {
            Some(json) => Request::builder()
                .method(method)
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        };
        let response = router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, json)
    }

    fn submission(id: &str) -> serde_json::Value {
        serde_json::json!({
            "id": id,
            "campaignId": "campaign-7",
            "publisher": "0x1111111111111111111111111111111111111111",
            "gateway": "0x2222222222222222222222222222222222222222",
            "timestamp": 1_700_000_000u64,
            "consensusEvidence": {
                "approved": true,
                "approveVotes": "3",
                "totalVotes": "4",
                "requiredVotes": "3",
                "consensusReached": true
            }
        })
    }

    #[tokio::test]
    async fn test_dashboard_walkthrough() {
        let key = signing_key(0x42);
        let (ledger, dispatcher) = admin_ledger(&key, NEVER);
        let router = build_router(ledger, &ApiConfig::default());
        let signer = address_of(&key).to_string();

        // The dashboard starts empty.
        let (_, body) = call(&router, Method::GET, "/api/transactions/pending", None).await;
        assert_eq!(body["count"], 0);

        // A quorum-approved transaction arrives.
        let (status, body) = call(
            &router,
            Method::POST,
            "/api/transactions/submit",
            Some(submission("0xclick")),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["state"], "PENDING_ADMIN_APPROVAL");

        // The admin checks their nonce, signs, and approves.
        let (_, body) = call(
            &router,
            Method::GET,
            &format!("/api/admin/nonce/{signer}"),
            None,
        )
        .await;
        let nonce = body["nonce"].as_u64().unwrap();
        assert_eq!(nonce, 0);

        let signature = sign_approval(&key, "0xclick", nonce).to_string();
        let (status, body) = call(
            &router,
            Method::POST,
            "/api/transactions/approve",
            Some(serde_json::json!({
                "id": "0xclick",
                "signature": signature,
                "signerAddress": signer,
                "decision": "approve"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["state"], "ADMIN_APPROVED");
        assert_eq!(body["nextNonce"], 1);

        // Manual execution settles it.
        let (status, body) = call(
            &router,
            Method::POST,
            "/api/transactions/execute",
            Some(serde_json::json!({"id": "0xclick"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["state"], "EXECUTED");
        assert_eq!(dispatcher.dispatch_count(), 1);

        // The status view reflects the whole history.
        let (_, body) = call(&router, Method::GET, "/api/transactions/0xclick/status", None).await;
        assert_eq!(body["state"], "EXECUTED");
        assert_eq!(body["adminDecision"]["decision"], "approve");
        assert!(body["executedAt"].as_u64().unwrap() >= body["decidedAt"].as_u64().unwrap());

        // And the pending queue is empty again.
        let (_, body) = call(&router, Method::GET, "/api/transactions/pending", None).await;
        assert_eq!(body["count"], 0);
    }

    #[tokio::test]
    async fn test_error_envelope_is_uniform() {
        let key = signing_key(0x42);
        let (ledger, _) = admin_ledger(&key, NEVER);
        let router = build_router(ledger, &ApiConfig::default());

        // Every failure carries the same envelope shape.
        let failures = [
            (
                Method::POST,
                "/api/transactions/submit",
                Some(serde_json::json!({"id": "0xclick"})),
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
            ),
            (
                Method::GET,
                "/api/transactions/0xghost/status",
                None,
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
            ),
            (
                Method::POST,
                "/api/transactions/execute",
                Some(serde_json::json!({"id": "0xghost"})),
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
            ),
        ];

        for (method, uri, body, expected_status, expected_kind) in failures {
            let (status, json) = call(&router, method, uri, body).await;
            assert_eq!(status, expected_status, "{uri}");
            assert_eq!(json["success"], false, "{uri}");
            assert_eq!(json["error"]["kind"], expected_kind, "{uri}");
            assert!(json["error"]["message"].is_string(), "{uri}");
        }
    }

    #[tokio::test]
    async fn test_signature_from_wrong_wallet_is_forbidden() {
        let admin = signing_key(0x42);
        let outsider = signing_key(0x77);
        let (ledger, _) = admin_ledger(&admin, NEVER);
        let router = build_router(ledger, &ApiConfig::default());

        call(
            &router,
            Method::POST,
            "/api/transactions/submit",
            Some(submission("0xclick")),
        )
        .await;

        // The outsider signs correctly for their own wallet, but the wallet
        // is not in the administrator set.
        let (status, body) = call(
            &router,
            Method::POST,
            "/api/transactions/approve",
            Some(serde_json::json!({
                "id": "0xclick",
                "signature": sign_approval(&outsider, "0xclick", 0).to_string(),
                "signerAddress": address_of(&outsider).to_string(),
                "decision": "approve"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error"]["kind"], "UNAUTHORIZED");

        // Claiming the admin's address with the outsider's signature fails
        // verification instead.
        let (status, body) = call(
            &router,
            Method::POST,
            "/api/transactions/approve",
            Some(serde_json::json!({
                "id": "0xclick",
                "signature": sign_approval(&outsider, "0xclick", 0).to_string(),
                "signerAddress": address_of(&admin).to_string(),
                "decision": "approve"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["kind"], "INVALID_SIGNATURE");
    }

    #[tokio::test]
    async fn test_admin_config_tracks_pending_queue() {
        let key = signing_key(0x42);
        let (ledger, _) = admin_ledger(&key, NEVER);
        let router = build_router(ledger, &ApiConfig::default());

        call(
            &router,
            Method::POST,
            "/api/transactions/submit",
            Some(submission("0xone")),
        )
        .await;
        call(
            &router,
            Method::POST,
            "/api/transactions/submit",
            Some(submission("0xtwo")),
        )
        .await;

        let (status, body) = call(&router, Method::GET, "/api/admin/config", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["adminCount"], 1);
        assert_eq!(body["pendingCount"], 2);
        assert_eq!(
            body["adminSigners"][0].as_str().unwrap(),
            address_of(&key).to_string()
        );
    }
}
