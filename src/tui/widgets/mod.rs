// Widget rendering, one module per dashboard zone or overlay.

pub mod add_form;
pub mod alert;
pub mod category_bar;
pub mod import_prompt;
pub mod notice;
pub mod quote_list;
pub mod quote_panel;
pub mod status_bar;
