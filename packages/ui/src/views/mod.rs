mod modal_overlay;
pub use modal_overlay::ModalOverlay;

mod liste_personnes;
pub use liste_personnes::ListePersonnesView;

mod ajouter_personne;
pub use ajouter_personne::AjouterPersonneView;
