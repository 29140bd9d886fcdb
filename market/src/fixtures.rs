//! Static catalog of professionals and reviews.
//!
//! SYSTEM CONTEXT
//! ==============
//! The catalog is the only source of professional and review records. The
//! core never writes back to it. `Catalog::builtin` ships the bundled
//! Barcelona dataset; `Catalog::from_json` accepts an external file of the
//! same shape and validates it before handing it to the rest of the crate.

#[cfg(test)]
#[path = "fixtures_test.rs"]
mod fixtures_test;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use time::Date;
use time::macros::date;

use crate::ErrorCode;
use crate::types::{Coordinates, Professional, Review, ServiceType};

/// Neighbourhoods offered by the registration form, in display order.
pub const NEIGHBORHOODS: [&str; 10] = [
    "Eixample",
    "Gràcia",
    "Sants",
    "Poblenou",
    "Sarrià",
    "El Raval",
    "El Born",
    "Barceloneta",
    "Horta",
    "Les Corts",
];

/// Errors produced while loading an external catalog.
#[derive(Debug, thiserror::Error)]
pub enum FixtureError {
    /// The input is not valid catalog JSON.
    #[error("catalog parse failed: {0}")]
    Parse(#[from] serde_json::Error),

    /// Two professionals share an id.
    #[error("duplicate professional id: {0}")]
    DuplicateId(String),

    /// A professional or review rating lies outside 0.0..=5.0.
    #[error("rating {rating} out of range for {record}")]
    RatingOutOfRange { record: String, rating: f64 },

    /// A review references a professional that is not in the catalog.
    #[error("review {review} references unknown professional {professional}")]
    OrphanReview { review: String, professional: String },
}

impl ErrorCode for FixtureError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Parse(_) => "E_FIXTURE_PARSE",
            Self::DuplicateId(_) => "E_FIXTURE_DUPLICATE_ID",
            Self::RatingOutOfRange { .. } => "E_FIXTURE_RATING",
            Self::OrphanReview { .. } => "E_FIXTURE_ORPHAN_REVIEW",
        }
    }
}

/// Read-only set of professionals and their reviews.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub professionals: Vec<Professional>,
    #[serde(default)]
    pub reviews: Vec<Review>,
}

impl Catalog {
    /// Parse and validate a catalog from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::Parse`] for malformed JSON and the matching
    /// validation variant for duplicate ids, out-of-range ratings, or reviews
    /// without a professional.
    pub fn from_json(json: &str) -> Result<Self, FixtureError> {
        let catalog: Self = serde_json::from_str(json)?;
        catalog.validate()?;
        tracing::debug!(
            professionals = catalog.professionals.len(),
            reviews = catalog.reviews.len(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    fn validate(&self) -> Result<(), FixtureError> {
        let mut ids = HashSet::new();
        for p in &self.professionals {
            if !ids.insert(p.id.as_str()) {
                return Err(FixtureError::DuplicateId(p.id.clone()));
            }
            if !(0.0..=5.0).contains(&p.rating) {
                return Err(FixtureError::RatingOutOfRange { record: format!("professional {}", p.id), rating: p.rating });
            }
        }
        for r in &self.reviews {
            if !ids.contains(r.professional_id.as_str()) {
                return Err(FixtureError::OrphanReview { review: r.id.clone(), professional: r.professional_id.clone() });
            }
            if !(0.0..=5.0).contains(&r.rating) {
                return Err(FixtureError::RatingOutOfRange { record: format!("review {}", r.id), rating: r.rating });
            }
        }
        Ok(())
    }

    /// Look up a professional by id.
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&Professional> {
        self.professionals.iter().find(|p| p.id == id)
    }

    /// Reviews written for one professional, in catalog order.
    #[must_use]
    pub fn reviews_for(&self, id: &str) -> Vec<&Review> {
        self.reviews.iter().filter(|r| r.professional_id == id).collect()
    }

    /// The bundled Barcelona dataset.
    #[must_use]
    pub fn builtin() -> Self {
        Self { professionals: builtin_professionals(), reviews: builtin_reviews() }
    }
}

#[allow(clippy::too_many_arguments)]
fn pro(
    id: &str,
    name: &str,
    service: ServiceType,
    neighborhood: &str,
    rating: f64,
    review_count: u32,
    price_range: &str,
    description: &str,
    (lng, lat): (f64, f64),
    verified: bool,
    years_experience: u32,
) -> Professional {
    Professional {
        id: id.to_owned(),
        name: name.to_owned(),
        photo: format!("https://images.ifix.test/professionals/{id}.jpg"),
        service,
        neighborhood: neighborhood.to_owned(),
        rating,
        review_count,
        price_range: price_range.to_owned(),
        description: description.to_owned(),
        coordinates: Coordinates::new(lng, lat),
        verified,
        years_experience,
    }
}

fn builtin_professionals() -> Vec<Professional> {
    use ServiceType::{Cleaning, Electrical, Mechanic, Plumbing, Renovations};

    vec![
        pro(
            "1",
            "Fontanería García",
            Plumbing,
            "Gràcia",
            4.9,
            127,
            "40€-60€/h",
            "Fontanero con más de quince años en el barrio. Urgencias, fugas y calentadores.",
            (2.1589, 41.4036),
            true,
            15,
        ),
        pro(
            "2",
            "Electricidad Segura",
            Electrical,
            "Eixample",
            4.8,
            98,
            "35€-55€/h",
            "Instalaciones, boletines y reparaciones eléctricas con certificado.",
            (2.1620, 41.3917),
            true,
            12,
        ),
        pro(
            "3",
            "Limpiezas BCN",
            Cleaning,
            "Poblenou",
            4.7,
            203,
            "15€-20€/h",
            "Limpieza de hogares y oficinas, fin de obra y cristales.",
            (2.1996, 41.4036),
            true,
            8,
        ),
        pro(
            "4",
            "Taller Mecánico Sants",
            Mechanic,
            "Sants",
            4.6,
            76,
            "45€-70€/h",
            "Mecánica general, diagnosis y mantenimiento de coches y motos.",
            (2.1339, 41.3753),
            false,
            20,
        ),
        pro(
            "5",
            "Reformas Sarrià",
            Renovations,
            "Sarrià",
            4.9,
            54,
            "Desde 1500€",
            "Reformas integrales de cocinas y baños con presupuesto cerrado.",
            (2.1219, 41.3995),
            true,
            18,
        ),
        pro(
            "6",
            "Aigua Ràpida",
            Plumbing,
            "El Raval",
            4.4,
            41,
            "30€-45€/h",
            "Desatascos y reparaciones rápidas en Ciutat Vella.",
            (2.1700, 41.3797),
            false,
            6,
        ),
        pro(
            "7",
            "Voltio Born",
            Electrical,
            "El Born",
            4.5,
            63,
            "40€-50€/h",
            "Iluminación, cuadros eléctricos y domótica para pisos antiguos.",
            (2.1823, 41.3853),
            true,
            9,
        ),
        pro(
            "8",
            "Brillo Barceloneta",
            Cleaning,
            "Barceloneta",
            4.2,
            35,
            "14€-18€/h",
            "Limpieza de apartamentos turísticos entre estancias.",
            (2.1894, 41.3809),
            false,
            4,
        ),
        pro(
            "9",
            "Motor Horta",
            Mechanic,
            "Horta",
            4.8,
            112,
            "50€-65€/h",
            "Especialistas en vehículos híbridos y eléctricos.",
            (2.1563, 41.4297),
            true,
            14,
        ),
        pro(
            "10",
            "Obras Les Corts",
            Renovations,
            "Les Corts",
            4.3,
            29,
            "Presupuesto a medida",
            "Pintura, pladur y pequeñas reformas sin sorpresas.",
            (2.1307, 41.3851),
            false,
            7,
        ),
        pro(
            "11",
            "Fontanería Eixample 24h",
            Plumbing,
            "Eixample",
            4.6,
            88,
            "45€-65€/h",
            "Servicio de urgencias las 24 horas, los 365 días del año.",
            (2.1650, 41.3879),
            true,
            11,
        ),
        pro(
            "12",
            "Neteja Gràcia",
            Cleaning,
            "Gràcia",
            4.9,
            156,
            "16€-22€/h",
            "Limpieza ecológica con productos certificados.",
            (2.1561, 41.4010),
            true,
            10,
        ),
    ]
}

fn review(id: &str, professional_id: &str, author: &str, rating: f64, comment: &str, date: Date) -> Review {
    Review {
        id: id.to_owned(),
        professional_id: professional_id.to_owned(),
        author: author.to_owned(),
        rating,
        comment: comment.to_owned(),
        date,
    }
}

fn builtin_reviews() -> Vec<Review> {
    vec![
        review("r1", "1", "Laura M.", 5.0, "Vino en menos de una hora y arregló la fuga. Muy profesional.", date!(2025-11-28)),
        review("r2", "1", "Jordi P.", 5.0, "Precio justo y trabajo limpio.", date!(2025-11-14)),
        review("r3", "1", "Carmen S.", 4.5, "Muy amable, volveré a llamarle.", date!(2025-10-30)),
        review("r4", "2", "Pau R.", 5.0, "Nos hizo el boletín en un día.", date!(2025-11-20)),
        review("r5", "2", "Marta L.", 4.5, "Puntual y ordenado.", date!(2025-10-12)),
        review("r6", "3", "Sofía G.", 5.0, "El piso quedó impecable después de la obra.", date!(2025-11-25)),
        review("r7", "3", "Andreu V.", 4.0, "Buen servicio, algo de retraso.", date!(2025-11-03)),
        review("r8", "4", "Miguel A.", 4.5, "Diagnóstico rápido y sin cobrar de más.", date!(2025-11-18)),
        review("r9", "5", "Elena F.", 5.0, "Reforma de baño perfecta y en plazo.", date!(2025-09-22)),
        review("r10", "6", "Oriol B.", 4.0, "Resolvió el atasco, aunque tardó en llegar.", date!(2025-11-09)),
        review("r11", "7", "Núria C.", 4.5, "Nos dejaron la domótica funcionando.", date!(2025-10-28)),
        review("r12", "9", "David T.", 5.0, "Los únicos que entendieron mi híbrido.", date!(2025-11-21)),
        review("r13", "9", "Raquel N.", 4.5, "Muy transparentes con el presupuesto.", date!(2025-11-01)),
        review("r14", "11", "Xavier E.", 4.5, "Atendieron una urgencia un domingo por la noche.", date!(2025-11-16)),
        review("r15", "12", "Clara H.", 5.0, "Productos ecológicos y resultado excelente.", date!(2025-11-27)),
    ]
}
