// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Error-to-response mapping tests.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use ecolog::error::AppError;

#[test]
fn test_error_status_codes() {
    let cases = vec![
        (AppError::Unauthorized, StatusCode::UNAUTHORIZED),
        (AppError::InvalidToken, StatusCode::UNAUTHORIZED),
        (
            AppError::NotFound("user x".to_string()),
            StatusCode::NOT_FOUND,
        ),
        (
            AppError::BadRequest("bad".to_string()),
            StatusCode::BAD_REQUEST,
        ),
        (
            AppError::Forbidden("nope".to_string()),
            StatusCode::FORBIDDEN,
        ),
        (
            AppError::Validation {
                field: "category".to_string(),
                message: "unknown category".to_string(),
            },
            StatusCode::BAD_REQUEST,
        ),
        (
            AppError::Database("down".to_string()),
            StatusCode::INTERNAL_SERVER_ERROR,
        ),
    ];

    for (error, expected) in cases {
        let response = error.into_response();
        assert_eq!(response.status(), expected);
    }
}
