// handlers/mod.rs - one module per resource, one file per endpoint where the
// endpoint carries any logic of its own.
//
// Every handler is a thin shim: extract, call one service method, wrap the
// result in the response envelope. Errors convert into `ApiError` via `?`.

pub mod department;
pub mod employee;
pub mod hierarchy;
pub mod root;
