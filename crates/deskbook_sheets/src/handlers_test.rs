#[cfg(test)]
mod tests {
    use crate::handlers::{
        book_desk_handler, profile_handler, BookDeskRequest, DeskState, SharedLedger,
        StaffIdentity, EMAIL_HEADER, PICTURE_HEADER, USER_HEADER,
    };
    use crate::keys::{KeyOrder, Timeslot};
    use crate::memory::InMemoryLedger;
    use axum::extract::{FromRequestParts, State};
    use axum::http::{Request, StatusCode};
    use axum::Json;
    use chrono::NaiveDate;
    use deskbook_common::{DeskbookError, HttpStatusCode};
    use deskbook_config::{AppConfig, BookingConfig, LoggingConfig, ServerConfig};
    use std::sync::Arc;

    fn sept_21() -> NaiveDate {
        NaiveDate::from_ymd_opt(2022, 9, 21).unwrap()
    }

    fn state_with(ledger: Arc<InMemoryLedger>) -> Arc<DeskState> {
        let config = Arc::new(AppConfig {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
            },
            use_sheets: false,
            sheets: None,
            booking: BookingConfig::default(),
            logging: LoggingConfig::default(),
            home_url: Some("https://intranet.example.org".to_string()),
        });
        let ledger: Arc<SharedLedger> = ledger;
        Arc::new(DeskState::new(config, ledger))
    }

    fn one_desk() -> Arc<InMemoryLedger> {
        Arc::new(InMemoryLedger::seed_window(
            sept_21(),
            2,
            &["Desk 1".to_string()],
            KeyOrder::DateFirst,
        ))
    }

    fn staff(email: &str) -> StaffIdentity {
        StaffIdentity {
            email: email.to_string(),
            display_name: None,
            picture_url: None,
        }
    }

    fn body(date: NaiveDate, slot: Timeslot) -> Json<BookDeskRequest> {
        Json(BookDeskRequest {
            booking_date: date,
            booking_time: slot,
        })
    }

    #[tokio::test]
    async fn test_identity_from_proxy_headers() {
        let (mut parts, _) = Request::builder()
            .uri("/book")
            .header(EMAIL_HEADER, "ann@x.org")
            .header(USER_HEADER, "Ann")
            .header(PICTURE_HEADER, "https://pics.example.org/ann.png")
            .body(())
            .unwrap()
            .into_parts();

        let identity = StaffIdentity::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert_eq!(identity.email, "ann@x.org");
        assert_eq!(identity.display_name.as_deref(), Some("Ann"));
        assert_eq!(
            identity.picture_url.as_deref(),
            Some("https://pics.example.org/ann.png")
        );
    }

    #[tokio::test]
    async fn test_missing_or_blank_email_is_unauthorized() {
        for request in [
            Request::builder().uri("/book").body(()).unwrap(),
            Request::builder()
                .uri("/book")
                .header(EMAIL_HEADER, "  ")
                .body(())
                .unwrap(),
        ] {
            let (mut parts, _) = request.into_parts();
            let err = StaffIdentity::from_request_parts(&mut parts, &())
                .await
                .unwrap_err();
            assert!(matches!(err, DeskbookError::AuthError(_)));
            assert_eq!(err.status_code(), 401);
        }
    }

    #[tokio::test]
    async fn test_book_desk_statuses() {
        let state = state_with(one_desk());

        let (status, Json(response)) = book_desk_handler(
            State(state.clone()),
            staff("ann@x.org"),
            body(sept_21(), Timeslot::Am),
        )
        .await
        .unwrap();
        assert_eq!(status, StatusCode::CREATED);
        assert!(response.success);
        assert_eq!(response.locations, vec!["Desk 1".to_string()]);

        // the only morning desk is gone
        let (status, Json(response)) = book_desk_handler(
            State(state.clone()),
            staff("bob@x.org"),
            body(sept_21(), Timeslot::Am),
        )
        .await
        .unwrap();
        assert_eq!(status, StatusCode::CONFLICT);
        assert!(!response.success);

        let (status, _) = book_desk_handler(
            State(state.clone()),
            staff("ann@x.org"),
            body(sept_21(), Timeslot::AmPm),
        )
        .await
        .unwrap();
        assert_eq!(status, StatusCode::CONFLICT);

        let (status, Json(response)) = book_desk_handler(
            State(state),
            staff("ann@x.org"),
            body(NaiveDate::from_ymd_opt(2022, 10, 1).unwrap(), Timeslot::Pm),
        )
        .await
        .unwrap();
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(response.message.contains("not a valid booking date"));
    }

    #[tokio::test]
    async fn test_book_desk_reports_ledger_outage() {
        let ledger = one_desk();
        ledger.set_unavailable(true);
        let state = state_with(ledger);

        let err = book_desk_handler(
            State(state),
            staff("ann@x.org"),
            body(sept_21(), Timeslot::Am),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status_code(), 502);
    }

    #[tokio::test]
    async fn test_profile_includes_home_url() {
        let state = state_with(one_desk());
        let Json(profile) = profile_handler(
            State(state),
            StaffIdentity {
                email: "ann@x.org".to_string(),
                display_name: Some("Ann".to_string()),
                picture_url: None,
            },
        )
        .await;

        assert_eq!(profile.email, "ann@x.org");
        assert_eq!(profile.display_name.as_deref(), Some("Ann"));
        assert_eq!(profile.picture_url, None);
        assert_eq!(
            profile.home_url.as_deref(),
            Some("https://intranet.example.org")
        );
    }
}
