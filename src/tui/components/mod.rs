// Components module - UI building blocks
//
// Stateful panels (own their cursor/inputs, render from a view of App):
// - FactForm: submission form
// - CategoryFilter: category sidebar
// - FactList: the facts with their vote counters
//
// Shell components render straight from &App:
// - Title bar, status bar, toast

pub mod category_filter;
pub mod fact_form;
pub mod fact_list;
pub mod formatters;
pub mod status_bar;
pub mod title_bar;
pub mod toast;

pub use category_filter::CategoryFilter;
pub use fact_form::{FactForm, FormAction};
pub use fact_list::{FactList, FactListView};
pub use toast::Toast;
