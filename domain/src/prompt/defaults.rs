//! Built-in instruction text.
//!
//! Deployments normally override all of these through configuration; the
//! defaults keep a fresh install usable and give tests realistic input.

use crate::routing::category::Category;
use crate::routing::expert::ExpertKind;

/// Classifier system prompt: the labelling rubric.
pub const CLASSIFIER_RUBRIC: &str = r#"Based on the user query and the conversation history, decide which kind of advisor must answer.
- Reply "yes" when the question is about cars, electric vehicles, charging, or Peugeot in general.
- Reply "no" for greetings, thanks, small talk, questions about the user's nearby location, or anything that does not need a vehicle specialist.
- Reply "ok" when the question is about autonomy, public or home charging, battery capacity, or WLTP range of one of these models: E-208, E-2008, E-308, E-3008, Peugeot Expert, Peugeot Partner. Also reply "ok" when the user asks for information about one of these models."#;

/// Classifier user message.
pub const CLASSIFIER_TEMPLATE: &str = r#"User query: {user_input}

History:
{history}

{format_instructions}"#;

/// Format instructions for the classifier answer.
pub fn classification_format_instructions() -> String {
    let labels = Category::ALL
        .iter()
        .map(|c| format!("\"{}\"", c.legacy_label()))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "Reply with a single JSON object of the form {{\"relevant_yes_no\": <label>}} where <label> is one of {labels}. Do not add any other text."
    )
}

const GENERAL_SYSTEM: &str = r#"Vous êtes EV Genius, conseiller en véhicules électriques pour Peugeot. Vous menez une conversation naturelle et amicale, jamais un simple jeu de questions-réponses.
- Si l'utilisateur dit "bonjour" ou "hello", saluez-le, présentez-vous brièvement et demandez comment l'aider.
- Mettez subtilement en avant les véhicules électriques Peugeot et leurs services, sans être trop commercial.
- Pour les prix, renvoyez vers https://store.peugeot.fr/ ; pour un essai, vers https://essai.peugeot.fr/ ; pour un concessionnaire, vers https://concessions.peugeot.fr/.
- Ne communiquez aucun numéro de téléphone ni adresse e-mail.
- Si le sujet est sensible ou personnel, conseillez un professionnel qualifié puis revenez aux véhicules électriques.
- Terminez toujours par une courte question pour relancer la conversation."#;

const DOMAIN_SYSTEM: &str = r#"Vous êtes EV Genius, expert en véhicules électriques Peugeot. Répondez avec précision en vous appuyant sur les informations produit ci-dessous, de façon concise et naturelle, et terminez par une courte question.

<context>
{context}
</context>"#;

const DATA_LOOKUP_SYSTEM: &str = r#"Vous êtes EV Genius, expert des données techniques des véhicules électriques Peugeot (capacité de batterie, autonomie WLTP, recharge). Vulgarisez les chiffres pour un public non technique. Si l'information n'est pas dans les données ci-dessous, dites-le et proposez la page adéquate du site Peugeot.

<context>
{context}
</context>"#;

const EXPERT_TEMPLATE: &str = r#"Voici l'historique des échanges précédents pour contexte :
{history}

Nouvelle requête de l'utilisateur :
{user_input}

Répondez directement et de manière concise (2-3 lignes maximum) sans répéter la question. Proposez ensuite de courtes suggestions (2-3 mots chacune) que l'utilisateur pourrait poser, toujours en lien avec Peugeot ou les véhicules électriques.

Formatez votre réponse selon ces instructions : {format_instructions}"#;

/// Default system prompt for an expert.
pub fn expert_system_prompt(kind: ExpertKind) -> &'static str {
    match kind {
        ExpertKind::General => GENERAL_SYSTEM,
        ExpertKind::Domain => DOMAIN_SYSTEM,
        ExpertKind::DataLookup => DATA_LOOKUP_SYSTEM,
    }
}

/// Default user-message template, shared by all experts.
pub fn expert_template(_kind: ExpertKind) -> &'static str {
    EXPERT_TEMPLATE
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::{Placeholder, PromptTemplate};

    #[test]
    fn test_classifier_template_has_required_placeholders() {
        let t = PromptTemplate::new(CLASSIFIER_TEMPLATE);
        assert!(
            t.require(&[
                Placeholder::UserInput,
                Placeholder::History,
                Placeholder::FormatInstructions
            ])
            .is_ok()
        );
    }

    #[test]
    fn test_classification_instructions_list_all_labels() {
        let text = classification_format_instructions();
        for label in ["\"no\"", "\"yes\"", "\"ok\""] {
            assert!(text.contains(label));
        }
    }

    #[test]
    fn test_knowledge_experts_reference_context() {
        assert!(expert_system_prompt(ExpertKind::Domain).contains("{context}"));
        assert!(expert_system_prompt(ExpertKind::DataLookup).contains("{context}"));
        assert!(!expert_system_prompt(ExpertKind::General).contains("{context}"));
    }
}
