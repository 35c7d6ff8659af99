//! Fixed user-facing text. The product ships in French; the data-preview
//! placeholder was never translated.

pub const NO_RESULTS: &str =
    "Aucun résultat précis trouvé. Essayez d'élargir la requête (moins de filtres).";
pub const NO_RECOMMENDATIONS: &str = "Aucune recommandation trouvée pour cette requête.";
pub const CHAT_APOLOGY: &str = "Désolé, je n'ai pas pu traiter votre demande pour le moment.";
pub const NO_PREVIEW_DATA: &str = "No data to display.";

pub const LABEL_TYPE: &str = "Type";
pub const LABEL_LEVEL: &str = "Niveau";
pub const LABEL_ROLES: &str = "Rôles";
pub const LABEL_PRODUCTS: &str = "Produits";
pub const LABEL_DURATION: &str = "Durée";
pub const LABEL_POPULARITY: &str = "Popularité";
pub const LABEL_STATUS: &str = "Statut";
pub const OPEN_TRAINING: &str = "Ouvrir la formation";

pub const KPI_TOTAL_ITEMS: &str = "Total items:";
pub const KPI_TOTAL_HOURS: &str = "Durée totale (heures):";
pub const KPI_AVG_POPULARITY: &str = "Popularité moyenne:";
pub const KPI_CERTIFIED: &str = "% Certifiés:";
pub const KPI_UNAVAILABLE: &str = "N/A";
