pub mod project_handler;

pub use project_handler::{
    create_project, delete_project, edit_project_page, list_projects, new_project_page,
    show_project, update_project,
};
