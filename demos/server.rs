//! Simple REST API server example for the vending machine engine.
//!
//! Run with: `cargo run --example server`
//!
//! ## Endpoints
//!
//! - `POST /deposit` - Add funds to the deposited balance
//! - `POST /vend` - Dispense units of a selection
//! - `GET /balance` - Current deposited balance
//! - `GET /items` - List stocked items in display order
//! - `GET /items/{selection}` - Get price and stock for one selection
//!
//! ## Example Usage
//!
//! ```bash
//! # Deposit
//! curl -X POST http://localhost:3000/deposit \
//!   -H "Content-Type: application/json" \
//!   -d '{"amount": "5.00"}'
//!
//! # Vend
//! curl -X POST http://localhost:3000/vend \
//!   -H "Content-Type: application/json" \
//!   -d '{"selection": "soda", "quantity": 1}'
//!
//! # Inspect
//! curl http://localhost:3000/items/soda
//! curl http://localhost:3000/balance
//! ```

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::net::TcpListener;
use vending_machine_rs::{Inventory, Item, Selection, VendError, VendingMachine};

// === Request/Response DTOs ===

/// Request body for deposits.
#[derive(Debug, Deserialize)]
pub struct DepositRequest {
    pub amount: Decimal,
}

/// Request body for vends.
#[derive(Debug, Deserialize)]
pub struct VendRequest {
    pub selection: Selection,
    pub quantity: u32,
}

/// Response body carrying the balance after a deposit.
#[derive(Debug, Serialize)]
pub struct BalanceResponse {
    pub balance: Decimal,
}

/// Response body for a successful vend.
#[derive(Debug, Serialize)]
pub struct VendResponse {
    pub balance: Decimal,
    pub remaining_quantity: u32,
}

/// Response body for one stocked item.
#[derive(Debug, Serialize)]
pub struct ItemResponse {
    pub selection: Selection,
    pub price: Decimal,
    pub quantity: u32,
}

/// Response body for errors.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

// === Application State ===

/// Shared application state containing one machine.
#[derive(Clone)]
pub struct AppState {
    pub machine: Arc<VendingMachine>,
}

// === Error Handling ===

/// Wrapper for converting `VendError` into HTTP responses.
pub struct AppError(VendError);

impl From<VendError> for AppError {
    fn from(err: VendError) -> Self {
        AppError(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = match &self.0 {
            VendError::InvalidSelection => (StatusCode::NOT_FOUND, "INVALID_SELECTION"),
            VendError::OutOfStock => (StatusCode::UNPROCESSABLE_ENTITY, "OUT_OF_STOCK"),
            VendError::InsufficientFunds => {
                (StatusCode::UNPROCESSABLE_ENTITY, "INSUFFICIENT_FUNDS")
            }
            VendError::InvalidAmount => (StatusCode::BAD_REQUEST, "INVALID_AMOUNT"),
            VendError::InvalidQuantity => (StatusCode::BAD_REQUEST, "INVALID_QUANTITY"),
        };

        (
            status,
            Json(ErrorResponse {
                error: self.0.to_string(),
                code: code.to_string(),
            }),
        )
            .into_response()
    }
}

// === Handlers ===

/// POST /deposit - Add funds to the balance.
async fn create_deposit(
    State(state): State<AppState>,
    Json(request): Json<DepositRequest>,
) -> Result<Json<BalanceResponse>, AppError> {
    state.machine.deposit(request.amount)?;
    Ok(Json(BalanceResponse {
        balance: state.machine.balance(),
    }))
}

/// POST /vend - Dispense units of a selection.
async fn create_vend(
    State(state): State<AppState>,
    Json(request): Json<VendRequest>,
) -> Result<Json<VendResponse>, AppError> {
    state.machine.vend(request.selection, request.quantity)?;
    let remaining = state
        .machine
        .item(request.selection)
        .map(|item| item.quantity)
        .unwrap_or(0);
    Ok(Json(VendResponse {
        balance: state.machine.balance(),
        remaining_quantity: remaining,
    }))
}

/// GET /balance - Current deposited balance.
async fn get_balance(State(state): State<AppState>) -> Json<BalanceResponse> {
    Json(BalanceResponse {
        balance: state.machine.balance(),
    })
}

/// GET /items/{selection} - Get one item by selection name.
async fn get_item(
    State(state): State<AppState>,
    Path(selection): Path<Selection>,
) -> Result<Json<ItemResponse>, (StatusCode, Json<ErrorResponse>)> {
    state
        .machine
        .item(selection)
        .map(|item| {
            Json(ItemResponse {
                selection,
                price: item.price,
                quantity: item.quantity,
            })
        })
        .ok_or_else(|| {
            (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    error: "Selection not stocked".to_string(),
                    code: "INVALID_SELECTION".to_string(),
                }),
            )
        })
}

/// GET /items - List stocked items in display order.
async fn list_items(State(state): State<AppState>) -> Json<Vec<ItemResponse>> {
    let items: Vec<ItemResponse> = state
        .machine
        .selections()
        .iter()
        .filter_map(|&selection| {
            state.machine.item(selection).map(|item| ItemResponse {
                selection,
                price: item.price,
                quantity: item.quantity,
            })
        })
        .collect();

    Json(items)
}

// === Router ===

fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/deposit", post(create_deposit))
        .route("/vend", post(create_vend))
        .route("/balance", get(get_balance))
        .route("/items", get(list_items))
        .route("/items/{selection}", get(get_item))
        .with_state(state)
}

fn demo_inventory() -> Inventory {
    Inventory::from_iter([
        (Selection::Soda, Item { price: dec!(1.50), quantity: 4 }),
        (Selection::DietSoda, Item { price: dec!(1.50), quantity: 4 }),
        (Selection::Chips, Item { price: dec!(1.00), quantity: 6 }),
        (Selection::Cookie, Item { price: dec!(0.75), quantity: 8 }),
        (Selection::Sandwich, Item { price: dec!(4.00), quantity: 2 }),
        (Selection::Wrap, Item { price: dec!(4.50), quantity: 2 }),
        (Selection::CandyBar, Item { price: dec!(1.25), quantity: 10 }),
        (Selection::PopTart, Item { price: dec!(1.00), quantity: 5 }),
        (Selection::Water, Item { price: dec!(1.00), quantity: 12 }),
        (Selection::FruitJuice, Item { price: dec!(2.00), quantity: 6 }),
        (Selection::SportsDrink, Item { price: dec!(2.50), quantity: 6 }),
        (Selection::Gum, Item { price: dec!(0.75), quantity: 20 }),
    ])
}

// === Main ===

#[tokio::main]
async fn main() {
    let state = AppState {
        machine: Arc::new(VendingMachine::new(demo_inventory())),
    };

    let app = create_router(state);

    let listener = TcpListener::bind("127.0.0.1:3000").await.unwrap();
    println!("Vending machine API server running on http://127.0.0.1:3000");
    println!();
    println!("Endpoints:");
    println!("  POST /deposit            - Add funds");
    println!("  POST /vend               - Dispense a selection");
    println!("  GET  /balance            - Current balance");
    println!("  GET  /items              - List stocked items");
    println!("  GET  /items/{{selection}}  - Get item by selection");

    axum::serve(listener, app).await.unwrap();
}
