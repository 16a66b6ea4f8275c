//! Canned notifications for the supported banks, mirroring what each app
//! actually posts. Used to exercise the pipeline without a device.

use clap::ValueEnum;
use financas_ingest::NotificationEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Bank {
    Nubank,
    Bb,
    Gpay,
}

impl Bank {
    fn app_name(self) -> &'static str {
        match self {
            Bank::Nubank => "Nubank",
            Bank::Bb => "Banco do Brasil",
            Bank::Gpay => "Google Pay",
        }
    }

    fn package_id(self) -> &'static str {
        match self {
            Bank::Nubank => "com.nu.production",
            Bank::Bb => "br.com.bb.android",
            Bank::Gpay => "com.google.android.apps.walletnfcrel",
        }
    }

    /// Demo amounts matching the app's test buttons.
    pub fn default_amount(self, income: bool) -> f64 {
        match (self, income) {
            (Bank::Nubank, true) => 150.00,
            (Bank::Nubank, false) => 89.90,
            (Bank::Bb, true) => 500.00,
            (Bank::Bb, false) => 75.00,
            (Bank::Gpay, true) => 100.00,
            (Bank::Gpay, false) => 25.50,
        }
    }
}

/// Amounts render the way the apps print them: comma decimal.
fn format_amount(amount: f64) -> String {
    format!("{amount:.2}").replace('.', ",")
}

pub fn sample_event(bank: Bank, income: bool, amount: f64) -> NotificationEvent {
    let value = format_amount(amount);
    let body = match (bank, income) {
        (Bank::Nubank, true) => format!("Você recebeu um Pix de R$ {value}"),
        (Bank::Nubank, false) => format!("Compra aprovada no débito de R$ {value}"),
        (Bank::Bb, true) => format!("Transferência recebida - Pix de R$ {value}"),
        (Bank::Bb, false) => format!("Pagamento realizado de R$ {value}"),
        (Bank::Gpay, true) => format!("Você recebeu R$ {value}"),
        (Bank::Gpay, false) => format!("Pagamento de R$ {value} aprovado"),
    };
    NotificationEvent {
        package_name: bank.package_id().to_string(),
        app_name: bank.app_name().to_string(),
        title: bank.app_name().to_string(),
        body,
        timestamp: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use financas_core::{Direction, PaymentMethod};
    use financas_ingest::{NotificationClassifier, RawNotification};

    fn classify(bank: Bank, income: bool) -> financas_core::Transaction {
        let event = sample_event(bank, income, bank.default_amount(income));
        NotificationClassifier::new()
            .classify(&RawNotification::from(&event))
            .expect("canned notifications always classify")
    }

    #[test]
    fn test_amount_renders_with_comma() {
        assert_eq!(format_amount(1234.5), "1234,50");
        assert_eq!(format_amount(89.9), "89,90");
    }

    #[test]
    fn test_every_canned_notification_classifies() {
        for bank in [Bank::Nubank, Bank::Bb, Bank::Gpay] {
            for income in [true, false] {
                let txn = classify(bank, income);
                let expected = if income {
                    Direction::Income
                } else {
                    Direction::Expense
                };
                assert_eq!(txn.direction, expected, "{bank:?} income={income}");
                assert_eq!(txn.amount, bank.default_amount(income));
            }
        }
    }

    #[test]
    fn test_nubank_debit_sample_uses_debit_rail() {
        assert_eq!(classify(Bank::Nubank, false).method, PaymentMethod::Debit);
    }

    #[test]
    fn test_pix_samples_stay_on_pix_rail() {
        assert_eq!(classify(Bank::Nubank, true).method, PaymentMethod::Pix);
        assert_eq!(classify(Bank::Bb, true).method, PaymentMethod::Pix);
        assert_eq!(classify(Bank::Gpay, false).method, PaymentMethod::Pix);
    }
}
