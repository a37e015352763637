// handlers/public/system.rs - GET /, GET /health, GET /docs/*

use axum::response::Json;
use serde_json::{json, Value};

pub async fn root() -> Json<Value> {
    Json(json!({
        "success": true,
        "data": {
            "name": "Caravane API",
            "version": env!("CARGO_PKG_VERSION"),
            "description": "Restaurant ordering management backend",
            "endpoints": {
                "public": "/login, /logout, /submit, /health, /docs/",
                "superadmin": "/SuperAdmin/restaurants, /SuperAdmin/admins, /SuperAdmin/notifications",
                "authenticated": "/restaurants/:restaurant_id/menus, /restaurants/:restaurant_id/orders, /orders, /payments, /me"
            }
        }
    }))
}

pub async fn health() -> &'static str {
    "OK"
}

/// Endpoint catalog
pub async fn docs() -> Json<Value> {
    Json(json!({
        "success": true,
        "data": [
            { "method": "POST", "path": "/login", "access": "public" },
            { "method": "POST", "path": "/logout", "access": "public" },
            { "method": "POST", "path": "/submit", "access": "public" },
            { "method": "GET", "path": "/health", "access": "public" },
            { "method": "GET", "path": "/SuperAdmin/restaurants", "access": "SuperAdmin" },
            { "method": "POST", "path": "/SuperAdmin/restaurants", "access": "SuperAdmin" },
            { "method": "GET", "path": "/SuperAdmin/restaurants/:id", "access": "SuperAdmin" },
            { "method": "PUT", "path": "/SuperAdmin/restaurants/:id", "access": "SuperAdmin" },
            { "method": "DELETE", "path": "/SuperAdmin/restaurants/:id", "access": "SuperAdmin" },
            { "method": "GET", "path": "/SuperAdmin/admins", "access": "SuperAdmin" },
            { "method": "POST", "path": "/SuperAdmin/admins", "access": "SuperAdmin" },
            { "method": "GET", "path": "/SuperAdmin/admins/:id", "access": "SuperAdmin" },
            { "method": "PUT", "path": "/SuperAdmin/admins/:id", "access": "SuperAdmin" },
            { "method": "DELETE", "path": "/SuperAdmin/admins/:id", "access": "SuperAdmin" },
            { "method": "GET", "path": "/SuperAdmin/notifications", "access": "SuperAdmin" },
            { "method": "POST", "path": "/SuperAdmin/notifications", "access": "SuperAdmin" },
            { "method": "GET", "path": "/SuperAdmin/notifications/:id", "access": "SuperAdmin" },
            { "method": "PUT", "path": "/SuperAdmin/notifications/:id", "access": "SuperAdmin" },
            { "method": "DELETE", "path": "/SuperAdmin/notifications/:id", "access": "SuperAdmin" },
            { "method": "PATCH", "path": "/SuperAdmin/notifications/:id/read", "access": "SuperAdmin" },
            { "method": "GET", "path": "/restaurants/:restaurant_id/menus", "access": "authenticated" },
            { "method": "POST", "path": "/restaurants/:restaurant_id/menus", "access": "authenticated" },
            { "method": "GET", "path": "/restaurants/:restaurant_id/orders", "access": "authenticated" },
            { "method": "POST", "path": "/orders", "access": "authenticated" },
            { "method": "PUT", "path": "/orders/:order_id/status", "access": "authenticated" },
            { "method": "POST", "path": "/payments", "access": "authenticated" },
            { "method": "GET", "path": "/orders/:order_id/payment", "access": "authenticated" },
            { "method": "GET", "path": "/me", "access": "authenticated" }
        ]
    }))
}
