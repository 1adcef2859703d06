// Core session logic
pub mod core;

// Middleware
pub mod middleware;

// Wire models (requests/responses)
pub mod models;

// HTTP and WebSocket routes
pub mod routes;

// Application state
pub mod state;
