//! Resource services: generic CRUD over the repository, and request body validation.

mod crud;
mod validation;
pub use crud::{CrudService, ExpensesService, GuestsService, WeddingsService};
pub use validation::RequestValidator;
