//! Budget routes - list panel, create/edit form, delete confirmation

pub mod api;
pub mod page;

pub use api::{
    api_state, htmx_create_submit, htmx_delete, htmx_delete_cancel, htmx_edit_submit, htmx_field_edit,
    htmx_modal_close, htmx_reload,
};
pub use page::{htmx_create_form, htmx_delete_confirm, htmx_edit_form, htmx_panel, page_index};
