//! The fixed knowledge bases and the questions asked of each

use std::collections::BTreeMap;

use super::entity::KnowledgeBaseTopic;
use super::provider::Document;

/// Topic → ordered sentences
pub type KnowledgeBase = BTreeMap<KnowledgeBaseTopic, Vec<&'static str>>;

const COMPANY_DOCS: &[&str] = &[
    "Our company policy states that employees get 25 days of vacation per year.",
    "The dress code is business casual on weekdays and casual on Fridays.",
    "Health insurance covers 80% of medical expenses for employees and families.",
    "Remote work is allowed up to 3 days per week with manager approval.",
    "Performance reviews are conducted quarterly with annual salary adjustments.",
];

const PRODUCT_DOCS: &[&str] = &[
    "Our software supports Windows 10, 11, and macOS 12.0+.",
    "The API rate limit is 1000 requests per hour per user.",
    "Data is encrypted using AES-256 encryption at rest and in transit.",
    "Backup is performed automatically every 24 hours.",
    "Customer support is available 24/7 via email and phone.",
];

const LEGAL_DOCS: &[&str] = &[
    "The contract termination requires 30 days written notice.",
    "Intellectual property created during employment belongs to the company.",
    "Non-disclosure agreements are valid for 5 years after employment.",
    "Severance pay is calculated as 2 weeks per year of service.",
    "Disputes are resolved through binding arbitration in the state of California.",
];

const COMPANY_QUESTIONS: &[&str] = &[
    "How many vacation days do employees get?",
    "What is the dress code policy?",
    "Is remote work allowed?",
];

const PRODUCT_QUESTIONS: &[&str] = &[
    "What operating systems are supported?",
    "What is the API rate limit?",
    "How often are backups performed?",
];

const LEGAL_QUESTIONS: &[&str] = &[
    "How much notice is required for contract termination?",
    "Who owns intellectual property created during employment?",
    "How long are NDAs valid?",
];

/// Build the company, product and legal knowledge bases
pub fn create_knowledge_base() -> KnowledgeBase {
    KnowledgeBaseTopic::ALL
        .into_iter()
        .map(|topic| (topic, sentences_for(topic).to_vec()))
        .collect()
}

pub fn sentences_for(topic: KnowledgeBaseTopic) -> &'static [&'static str] {
    match topic {
        KnowledgeBaseTopic::Company => COMPANY_DOCS,
        KnowledgeBaseTopic::Product => PRODUCT_DOCS,
        KnowledgeBaseTopic::Legal => LEGAL_DOCS,
    }
}

/// Example questions for a knowledge base
pub fn questions_for(topic: KnowledgeBaseTopic) -> &'static [&'static str] {
    match topic {
        KnowledgeBaseTopic::Company => COMPANY_QUESTIONS,
        KnowledgeBaseTopic::Product => PRODUCT_QUESTIONS,
        KnowledgeBaseTopic::Legal => LEGAL_QUESTIONS,
    }
}

/// Wrap a topic's sentences as documents tagged with the topic
pub fn topic_documents(topic: KnowledgeBaseTopic, sentences: &[&str]) -> Vec<Document> {
    sentences
        .iter()
        .enumerate()
        .map(|(i, sentence)| {
            Document::new(format!("{}-{}", topic, i), *sentence)
                .with_metadata("topic", serde_json::json!(topic.as_str()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_knowledge_base_has_three_topics() {
        let kb = create_knowledge_base();

        let keys: Vec<&str> = kb.keys().map(|t| t.as_str()).collect();
        assert_eq!(keys, vec!["company", "product", "legal"]);

        for sentences in kb.values() {
            assert!(!sentences.is_empty());
            assert!(sentences.iter().all(|s| !s.trim().is_empty()));
        }
    }

    #[test]
    fn test_knowledge_base_preserves_sentence_order() {
        let kb = create_knowledge_base();
        let company = &kb[&KnowledgeBaseTopic::Company];

        assert_eq!(company.len(), 5);
        assert!(company[0].contains("25 days of vacation"));
        assert!(company[4].contains("Performance reviews"));
    }

    #[test]
    fn test_every_topic_has_questions() {
        for topic in KnowledgeBaseTopic::ALL {
            let questions = questions_for(topic);
            assert!(!questions.is_empty(), "no questions for {}", topic);
            assert!(questions.iter().all(|q| !q.trim().is_empty()));
        }
    }

    #[test]
    fn test_topic_documents() {
        let docs = topic_documents(KnowledgeBaseTopic::Legal, sentences_for(KnowledgeBaseTopic::Legal));

        assert_eq!(docs.len(), 5);
        assert_eq!(docs[0].id, "legal-0");
        assert_eq!(docs[0].metadata.get("topic"), Some(&serde_json::json!("legal")));
        assert!(docs[2].content.starts_with("Non-disclosure agreements"));
    }
}
