// File: crates/deskbook_sheets/src/doc.rs

#![allow(dead_code)]
#![cfg(feature = "openapi")]
use utoipa::OpenApi;

use crate::handlers::{BookDeskRequest, ProfileResponse};
use crate::keys::Timeslot;
use crate::logic::BookingResponse;

#[utoipa::path(
    post,
    path = "/book",
    request_body(content = BookDeskRequest, example = json!({
        "booking_date": "2022-09-21",
        "booking_time": "AMPM"
    })),
    params(
        ("X-Auth-Request-Email" = String, Header, description = "E-mail of the signed-in staff member")
    ),
    responses(
        (status = 201, description = "Desk booked", body = BookingResponse,
         example = json!({
             "success": true,
             "message": "Success! Booked you a desk for Wed, 21 Sep 2022, Desk 1 whole day",
             "locations": ["Desk 1", "Desk 1"]
         })
        ),
        (status = 409, description = "Duplicate booking or no desk left", body = BookingResponse,
         example = json!({
             "success": false,
             "message": "ERROR: Sorry, no more desks available for Wed, 21 Sep 2022 (AM)",
             "locations": []
         })
        ),
        (status = 422, description = "Date outside the booking window", body = BookingResponse),
        (status = 401, description = "No signed-in staff member"),
        (status = 502, description = "Ledger could not be reached")
    ),
    tag = "desks"
)]
fn doc_book_desk_handler() {}

#[utoipa::path(
    get,
    path = "/profile",
    params(
        ("X-Auth-Request-Email" = String, Header, description = "E-mail of the signed-in staff member")
    ),
    responses(
        (status = 200, description = "Signed-in staff member", body = ProfileResponse),
        (status = 401, description = "No signed-in staff member")
    ),
    tag = "desks"
)]
fn doc_profile_handler() {}

#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is up", body = String, example = json!("ok"))),
    tag = "desks"
)]
fn doc_health_handler() {}

#[derive(OpenApi)]
#[openapi(
    paths(doc_book_desk_handler, doc_profile_handler, doc_health_handler),
    components(schemas(BookDeskRequest, BookingResponse, ProfileResponse, Timeslot)),
    tags(
        (name = "desks", description = "Desk booking API")
    ),
    servers(
        (url = "/api", description = "Desk booking API server")
    )
)]
pub struct DeskbookApiDoc;
