//! Notification-to-transaction classifier.
//!
//! A single-pass, stage-gated pipeline: each stage either rejects the
//! notification (`None`) or narrows the interpretation for the next one.
//! Rejection is silent; callers count or ignore it, nothing is logged
//! here.

use financas_core::{Direction, PaymentMethod, Transaction};
use regex::Regex;

use crate::amount::AmountMatcher;
use crate::event::RawNotification;
use crate::sources;

/// Words that mark a notification as describing a transaction at all.
/// Purely informational bank notifications (marketing, security alerts)
/// contain none of these.
pub const TRANSACTION_KEYWORDS: &[&str] = &[
    "recebeu",
    "recebido",
    "transferiu",
    "transferência",
    "transferencia",
    "pagamento",
    "pago",
    "compra",
    "pix",
    "débito",
    "debito",
    "crédito",
    "credito",
    "depósito",
    "deposito",
];

/// Keywords that prove money came in.
pub const INCOME_KEYWORDS: &[&str] = &[
    "recebeu",
    "recebido",
    "transferência recebida",
    "transferencia recebida",
    "depósito",
    "deposito",
    "crédito em conta",
    "credito em conta",
    "entrada",
];

/// Keywords that mark money going out.
pub const EXPENSE_KEYWORDS: &[&str] = &[
    "transferiu",
    "pagamento",
    "pago",
    "compra",
    "débito",
    "debito",
    "saída",
    "enviou",
];

const DEBIT_SIGNALS: &[&str] = &["débito", "debito", "compra no débito"];
const CREDIT_SIGNALS: &[&str] = &["crédito", "credito", "compra no crédito", "fatura"];

/// Used when neither description pattern captures anything usable.
pub const FALLBACK_DESCRIPTION: &str = "Transação automática via notificação";

/// Stateless classifier over raw notification text. Holds only compiled
/// patterns, so one instance can serve any number of concurrent calls.
pub struct NotificationClassifier {
    amounts: AmountMatcher,
    description_patterns: [Regex; 2],
}

impl NotificationClassifier {
    pub fn new() -> Self {
        Self {
            amounts: AmountMatcher::new(),
            description_patterns: [
                // "de|para|em <who>" before a currency marker or digit
                Regex::new(r"(?:de|para|em)\s+([^\d\r\n]{3,30}?)(?:\s*r\$|\s*\d|$)").unwrap(),
                // Leading run of text before a currency marker or digit
                Regex::new(r"^([^\d\r\n]{3,30}?)(?:\s*r\$|\s*\d)").unwrap(),
            ],
        }
    }

    /// Decide whether `notif` describes a completed transaction from a
    /// supported app and extract it. Total: every rejection is `None`,
    /// never an error.
    pub fn classify(&self, notif: &RawNotification) -> Option<Transaction> {
        let source = format!(
            "{} {} {} {}",
            notif.title, notif.body, notif.source_app_name, notif.source_package_id
        )
        .to_lowercase();
        if !sources::known_source(&source) {
            return None;
        }

        let text = format!("{} {}", notif.title, notif.body).to_lowercase();
        if !contains_any(&text, TRANSACTION_KEYWORDS) {
            return None;
        }

        let amount = self.amounts.extract(&text)?;
        let direction = classify_direction(&text);
        let method = classify_method(&text);
        let description = self.extract_description(&text);

        Some(Transaction::automatic(method, direction, amount, description))
    }

    fn extract_description(&self, text: &str) -> String {
        let mut description = FALLBACK_DESCRIPTION.to_string();
        for re in &self.description_patterns {
            if let Some(m) = re.captures(text).and_then(|caps| caps.get(1)) {
                let trimmed = m.as_str().trim();
                if !trimmed.is_empty() {
                    description = trimmed.to_string();
                    break;
                }
            }
        }
        capitalize_first(&description)
    }
}

impl Default for NotificationClassifier {
    fn default() -> Self {
        Self::new()
    }
}

fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| text.contains(k))
}

/// Income only when proven by an income keyword; everything else is an
/// expense, including text that matches no expense keyword either.
fn classify_direction(text: &str) -> Direction {
    if contains_any(text, INCOME_KEYWORDS) {
        return Direction::Income;
    }
    if contains_any(text, EXPENSE_KEYWORDS) {
        return Direction::Expense;
    }
    Direction::Expense
}

/// Pix unless a card rail is named. Credit is applied after debit, so a
/// text carrying both signals resolves to Credit.
fn classify_method(text: &str) -> PaymentMethod {
    let mut method = PaymentMethod::Pix;
    if contains_any(text, DEBIT_SIGNALS) {
        method = PaymentMethod::Debit;
    }
    if contains_any(text, CREDIT_SIGNALS) {
        method = PaymentMethod::Credit;
    }
    method
}

fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use financas_core::BalanceAccount;

    fn nubank(body: &str) -> RawNotification {
        RawNotification::new("Nubank", body, "Nubank", "com.nu.production")
    }

    #[test]
    fn test_rejects_unknown_source() {
        let classifier = NotificationClassifier::new();
        let notif = RawNotification::new(
            "Instagram",
            "R$ 50,00 pago em anúncios",
            "Instagram",
            "com.instagram.android",
        );
        assert_eq!(classifier.classify(&notif), None);
    }

    #[test]
    fn test_rejects_known_source_without_transaction_keyword() {
        let classifier = NotificationClassifier::new();
        let notif = nubank("Seu cartão virtual chegou");
        assert_eq!(classifier.classify(&notif), None);
    }

    #[test]
    fn test_rejects_keyword_without_amount() {
        let classifier = NotificationClassifier::new();
        let notif = nubank("Você recebeu um Pix");
        assert_eq!(classifier.classify(&notif), None);
    }

    #[test]
    fn test_pix_income() {
        let classifier = NotificationClassifier::new();
        let txn = classifier
            .classify(&nubank("Você recebeu um Pix de R$ 150,00"))
            .unwrap();
        assert_eq!(txn.method, PaymentMethod::Pix);
        assert_eq!(txn.direction, Direction::Income);
        assert_eq!(txn.amount, 150.0);
        assert_eq!(txn.category_tag, "Income");
        assert!(txn.is_automatic);
        assert_eq!(txn.balance_account, BalanceAccount::Main);
    }

    #[test]
    fn test_debit_purchase_is_expense() {
        let classifier = NotificationClassifier::new();
        let txn = classifier
            .classify(&nubank("Compra aprovada no débito de R$ 89,90"))
            .unwrap();
        assert_eq!(txn.method, PaymentMethod::Debit);
        assert_eq!(txn.direction, Direction::Expense);
        assert_eq!(txn.amount, 89.90);
        assert_eq!(txn.category_tag, "Expense");
    }

    #[test]
    fn test_credit_wins_over_debit() {
        let classifier = NotificationClassifier::new();
        let txn = classifier
            .classify(&nubank("Compra no débito estornada para o crédito de R$ 30,00"))
            .unwrap();
        assert_eq!(txn.method, PaymentMethod::Credit);
    }

    #[test]
    fn test_invoice_signal_sets_credit() {
        let classifier = NotificationClassifier::new();
        let txn = classifier
            .classify(&nubank("Pagamento da fatura de R$ 430,10 confirmado"))
            .unwrap();
        assert_eq!(txn.method, PaymentMethod::Credit);
        assert_eq!(txn.direction, Direction::Expense);
    }

    #[test]
    fn test_direction_defaults_to_expense_without_any_signal() {
        // "pix" passes the transaction gate but matches neither
        // direction list.
        let classifier = NotificationClassifier::new();
        let txn = classifier.classify(&nubank("Pix de R$ 12,00")).unwrap();
        assert_eq!(txn.direction, Direction::Expense);
        assert_eq!(txn.category_tag, "Expense");
    }

    #[test]
    fn test_description_after_preposition() {
        let classifier = NotificationClassifier::new();
        let txn = classifier
            .classify(&nubank("Pagamento para maria silva R$ 20,00"))
            .unwrap();
        assert_eq!(txn.description, "Maria silva");
    }

    #[test]
    fn test_description_from_leading_text() {
        let classifier = NotificationClassifier::new();
        let txn = classifier.classify(&nubank("Pix 45,90")).unwrap();
        assert_eq!(txn.description, "Nubank pix");
    }

    #[test]
    fn test_description_fallback() {
        // No preposition anywhere, and the digit two characters in is
        // inside the leading pattern's minimum window.
        let classifier = NotificationClassifier::new();
        let notif = RawNotification::new("", "45,90 enviado via Pix", "Nubank", "com.nu.production");
        let txn = classifier.classify(&notif).unwrap();
        assert_eq!(txn.description, FALLBACK_DESCRIPTION);
    }

    #[test]
    fn test_classification_is_idempotent() {
        let classifier = NotificationClassifier::new();
        let notif = nubank("Você recebeu um Pix de R$ 150,00");
        assert_eq!(classifier.classify(&notif), classifier.classify(&notif));
    }

    #[test]
    fn test_source_match_via_package_id_only() {
        let classifier = NotificationClassifier::new();
        let notif = RawNotification::new(
            "",
            "Depósito de R$ 300,00 em conta",
            "",
            "com.nu.production",
        );
        let txn = classifier.classify(&notif).unwrap();
        assert_eq!(txn.direction, Direction::Income);
        assert_eq!(txn.amount, 300.0);
    }

    #[test]
    fn test_empty_notification_is_rejected_not_panicked() {
        let classifier = NotificationClassifier::new();
        assert_eq!(classifier.classify(&RawNotification::default()), None);
    }
}
