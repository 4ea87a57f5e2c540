mod app_layout;
pub use app_layout::AppLayout;

mod personnes;
pub use personnes::Personnes;

mod ajouter;
pub use ajouter::Ajouter;
