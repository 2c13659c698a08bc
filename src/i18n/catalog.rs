//! Static translation catalogs: key → tagged value, one catalog per
//! language.
//!
//! Values are tagged by kind so callers go through kind-specific
//! accessors instead of assuming the shape of whatever a key holds.
//! English is the canonical catalog; French may have gaps, which the
//! resolver covers with its fallback chain.

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::i18n::Language;

/// One question/answer pair in an FAQ list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaqEntry {
    pub question: String,
    pub answer: String,
}

/// A translation catalog value.
///
/// The kind is fixed per key at catalog-build time: a key holding a
/// list never resolves to text and vice versa.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslationValue {
    /// A plain display string.
    Text(String),
    /// An ordered list of display strings (e.g., bullet points).
    List(Vec<String>),
    /// An ordered list of question/answer pairs.
    Faq(Vec<FaqEntry>),
}

impl TranslationValue {
    fn text(value: &str) -> Self {
        TranslationValue::Text(value.to_string())
    }

    fn list(items: &[&str]) -> Self {
        TranslationValue::List(items.iter().map(|s| s.to_string()).collect())
    }

    fn faq(entries: &[(&str, &str)]) -> Self {
        TranslationValue::Faq(
            entries
                .iter()
                .map(|(question, answer)| FaqEntry {
                    question: question.to_string(),
                    answer: answer.to_string(),
                })
                .collect(),
        )
    }
}

/// Get the catalog for a language.
///
/// Catalogs are built once per process and immutable thereafter.
pub fn catalog_for(language: Language) -> &'static HashMap<&'static str, TranslationValue> {
    static ENGLISH: OnceLock<HashMap<&'static str, TranslationValue>> = OnceLock::new();
    static FRENCH: OnceLock<HashMap<&'static str, TranslationValue>> = OnceLock::new();

    match language {
        Language::En => ENGLISH.get_or_init(english_catalog),
        Language::Fr => FRENCH.get_or_init(french_catalog),
    }
}

fn english_catalog() -> HashMap<&'static str, TranslationValue> {
    let mut c = HashMap::new();

    // ==================== Navigation ====================
    c.insert("nav_home", TranslationValue::text("Home"));
    c.insert("nav_services", TranslationValue::text("Services"));
    c.insert("nav_about", TranslationValue::text("About Us"));
    c.insert("nav_contact", TranslationValue::text("Contact"));
    c.insert("nav_register", TranslationValue::text("Register"));
    c.insert("nav_admin", TranslationValue::text("Admin"));

    // ==================== Hero ====================
    c.insert(
        "hero_title",
        TranslationValue::text("One team, five ways to move your life forward"),
    );
    c.insert(
        "hero_subtitle",
        TranslationValue::text(
            "Immigration guidance, driving lessons, language courses, IT consulting \
             and graphic design under one roof.",
        ),
    );
    c.insert("hero_cta", TranslationValue::text("Get started today"));

    // ==================== Services ====================
    c.insert("service_immigration", TranslationValue::text("MANÉ Immigration"));
    c.insert(
        "service_immigration_desc",
        TranslationValue::text(
            "Personalized consulting for study permits, work permits and permanent residency.",
        ),
    );
    c.insert("service_driving", TranslationValue::text("MANÉ Driving School"));
    c.insert(
        "service_driving_desc",
        TranslationValue::text("Certified instructors, flexible schedules, bilingual lessons."),
    );
    c.insert("service_languages", TranslationValue::text("MANÉ Language Courses"));
    c.insert(
        "service_languages_desc",
        TranslationValue::text("English and French classes for every level, online or in person."),
    );
    c.insert("service_innovation", TranslationValue::text("Mane Innovation"));
    c.insert(
        "service_innovation_desc",
        TranslationValue::text("IT and innovation consulting for small businesses going digital."),
    );
    c.insert("service_design", TranslationValue::text("MANÉ Graphic Design"));
    c.insert(
        "service_design_desc",
        TranslationValue::text("Logos, branding and print material that make you memorable."),
    );
    c.insert(
        "service_list",
        TranslationValue::list(&[
            "MANÉ Immigration",
            "MANÉ Driving School",
            "MANÉ Language Courses",
            "Mane Innovation",
            "MANÉ Graphic Design",
        ]),
    );
    c.insert(
        "immigration_steps",
        TranslationValue::list(&[
            "Book a free assessment call",
            "Build your personalized file",
            "Submit and track your application",
            "Prepare your arrival",
        ]),
    );

    // ==================== Forms ====================
    c.insert("form_full_name", TranslationValue::text("Full name"));
    c.insert("form_email", TranslationValue::text("Email address"));
    c.insert("form_phone", TranslationValue::text("Phone number"));
    c.insert("form_country", TranslationValue::text("Country"));
    c.insert("form_service", TranslationValue::text("Service of interest"));
    c.insert("form_subject", TranslationValue::text("Subject"));
    c.insert("form_message", TranslationValue::text("Message (optional)"));
    c.insert("form_submit", TranslationValue::text("Send"));
    c.insert("form_required", TranslationValue::text("This field is required"));
    c.insert("form_invalid_email", TranslationValue::text("Enter a valid email address"));
    c.insert(
        "form_success",
        TranslationValue::text("Thank you! We received your request and will reach out shortly."),
    );

    // ==================== Admin ====================
    c.insert("admin_title", TranslationValue::text("Admin dashboard"));
    c.insert("admin_tab_dashboard", TranslationValue::text("Dashboard"));
    c.insert("admin_tab_registrations", TranslationValue::text("Registrations"));
    c.insert("admin_tab_messages", TranslationValue::text("Messages"));
    c.insert("admin_tab_users", TranslationValue::text("Users"));
    c.insert("admin_export", TranslationValue::text("Export"));
    c.insert(
        "admin_delete_confirm",
        TranslationValue::text("This action cannot be undone. Delete this record?"),
    );
    c.insert("admin_no_entries", TranslationValue::text("No entries yet"));
    c.insert("admin_sign_in", TranslationValue::text("Sign in"));
    c.insert("admin_sign_out", TranslationValue::text("Sign out"));

    // ==================== FAQ ====================
    c.insert(
        "faq_immigration",
        TranslationValue::faq(&[
            (
                "How long does a study permit application take?",
                "Processing times vary by country, but most of our clients receive a \
                 decision within 8 to 12 weeks.",
            ),
            (
                "Do you review files you did not prepare?",
                "Yes. We offer a one-time file review with written recommendations.",
            ),
            (
                "Can you help after a refusal?",
                "We analyze the refusal letter and advise whether to reapply or appeal.",
            ),
        ]),
    );
    c.insert(
        "faq_driving",
        TranslationValue::faq(&[
            (
                "Are lessons available on weekends?",
                "Yes, Saturday and Sunday slots are available on request.",
            ),
            (
                "Do you provide the car for the road test?",
                "Yes, the lesson vehicle can be booked for your test day.",
            ),
        ]),
    );

    c
}

fn french_catalog() -> HashMap<&'static str, TranslationValue> {
    let mut c = HashMap::new();

    // ==================== Navigation ====================
    c.insert("nav_home", TranslationValue::text("Accueil"));
    c.insert("nav_services", TranslationValue::text("Services"));
    c.insert("nav_about", TranslationValue::text("À propos"));
    c.insert("nav_contact", TranslationValue::text("Contact"));
    c.insert("nav_register", TranslationValue::text("Inscription"));
    c.insert("nav_admin", TranslationValue::text("Admin"));

    // ==================== Hero ====================
    c.insert(
        "hero_title",
        TranslationValue::text("Une équipe, cinq façons de faire avancer votre vie"),
    );
    c.insert(
        "hero_subtitle",
        TranslationValue::text(
            "Conseil en immigration, cours de conduite, cours de langues, conseil en \
             informatique et design graphique sous un même toit.",
        ),
    );
    c.insert("hero_cta", TranslationValue::text("Commencez dès aujourd'hui"));

    // ==================== Services ====================
    // Brand names stay as-is in both languages.
    c.insert("service_immigration", TranslationValue::text("MANÉ Immigration"));
    c.insert(
        "service_immigration_desc",
        TranslationValue::text(
            "Accompagnement personnalisé pour permis d'études, permis de travail et \
             résidence permanente.",
        ),
    );
    c.insert("service_driving", TranslationValue::text("MANÉ Driving School"));
    c.insert(
        "service_driving_desc",
        TranslationValue::text(
            "Instructeurs certifiés, horaires flexibles, leçons bilingues.",
        ),
    );
    c.insert("service_languages", TranslationValue::text("MANÉ Language Courses"));
    c.insert(
        "service_languages_desc",
        TranslationValue::text(
            "Cours d'anglais et de français pour tous les niveaux, en ligne ou en personne.",
        ),
    );
    c.insert("service_innovation", TranslationValue::text("Mane Innovation"));
    c.insert(
        "service_innovation_desc",
        TranslationValue::text(
            "Conseil en informatique et innovation pour les petites entreprises en \
             transition numérique.",
        ),
    );
    c.insert("service_design", TranslationValue::text("MANÉ Graphic Design"));
    c.insert(
        "service_design_desc",
        TranslationValue::text(
            "Logos, image de marque et supports imprimés qui vous rendent mémorable.",
        ),
    );
    c.insert(
        "service_list",
        TranslationValue::list(&[
            "MANÉ Immigration",
            "MANÉ Driving School",
            "MANÉ Language Courses",
            "Mane Innovation",
            "MANÉ Graphic Design",
        ]),
    );
    c.insert(
        "immigration_steps",
        TranslationValue::list(&[
            "Réservez un appel d'évaluation gratuit",
            "Constituez votre dossier personnalisé",
            "Déposez et suivez votre demande",
            "Préparez votre arrivée",
        ]),
    );

    // ==================== Forms ====================
    c.insert("form_full_name", TranslationValue::text("Nom complet"));
    c.insert("form_email", TranslationValue::text("Adresse courriel"));
    c.insert("form_phone", TranslationValue::text("Numéro de téléphone"));
    c.insert("form_country", TranslationValue::text("Pays"));
    c.insert("form_service", TranslationValue::text("Service souhaité"));
    c.insert("form_subject", TranslationValue::text("Sujet"));
    c.insert("form_message", TranslationValue::text("Message (facultatif)"));
    c.insert("form_submit", TranslationValue::text("Envoyer"));
    c.insert("form_required", TranslationValue::text("Ce champ est obligatoire"));
    c.insert(
        "form_invalid_email",
        TranslationValue::text("Entrez une adresse courriel valide"),
    );
    c.insert(
        "form_success",
        TranslationValue::text(
            "Merci ! Nous avons bien reçu votre demande et vous contacterons sous peu.",
        ),
    );

    // ==================== Admin ====================
    c.insert("admin_title", TranslationValue::text("Tableau de bord"));
    c.insert("admin_tab_dashboard", TranslationValue::text("Tableau de bord"));
    c.insert("admin_tab_registrations", TranslationValue::text("Inscriptions"));
    c.insert("admin_tab_messages", TranslationValue::text("Messages"));
    c.insert("admin_tab_users", TranslationValue::text("Utilisateurs"));
    c.insert("admin_export", TranslationValue::text("Exporter"));
    c.insert(
        "admin_delete_confirm",
        TranslationValue::text("Cette action est irréversible. Supprimer cet enregistrement ?"),
    );
    c.insert("admin_no_entries", TranslationValue::text("Aucune entrée pour le moment"));
    c.insert("admin_sign_in", TranslationValue::text("Connexion"));
    c.insert("admin_sign_out", TranslationValue::text("Déconnexion"));

    // ==================== FAQ ====================
    c.insert(
        "faq_immigration",
        TranslationValue::faq(&[
            (
                "Combien de temps prend une demande de permis d'études ?",
                "Les délais varient selon le pays, mais la plupart de nos clients \
                 reçoivent une décision en 8 à 12 semaines.",
            ),
            (
                "Révisez-vous des dossiers que vous n'avez pas préparés ?",
                "Oui. Nous offrons une révision unique avec recommandations écrites.",
            ),
            (
                "Pouvez-vous aider après un refus ?",
                "Nous analysons la lettre de refus et conseillons entre une nouvelle \
                 demande ou un appel.",
            ),
        ]),
    );
    // faq_driving is intentionally absent in French; the resolver falls
    // back to the English entries.

    c
}
