//! Operation types and their debit/credit classification.

use std::fmt;

use rust_decimal::Decimal;

use crate::error::DomainError;

/// Kind of operation a transaction records.
///
/// The discriminants are the codes stored in `operations_types.operation_type_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i16)]
pub enum OperationType {
    Purchase = 1,
    InstallmentPurchase = 2,
    Withdrawal = 3,
    Payment = 4,
}

impl OperationType {
    pub const ALL: [OperationType; 4] = [
        OperationType::Purchase,
        OperationType::InstallmentPurchase,
        OperationType::Withdrawal,
        OperationType::Payment,
    ];

    pub fn code(self) -> i16 {
        self as i16
    }

    /// Debit-class operations reduce the balance and are stored negative.
    pub fn is_debit(self) -> bool {
        matches!(
            self,
            OperationType::Purchase | OperationType::InstallmentPurchase | OperationType::Withdrawal
        )
    }

    /// Credit-class operations increase the balance and are stored positive.
    pub fn is_credit(self) -> bool {
        self == OperationType::Payment
    }

    /// Apply this operation's sign to a magnitude.
    pub fn signed(self, amount: Decimal) -> Decimal {
        let magnitude = amount.abs();
        if self.is_debit() { -magnitude } else { magnitude }
    }
}

impl TryFrom<i16> for OperationType {
    type Error = DomainError;

    fn try_from(code: i16) -> Result<Self, Self::Error> {
        OperationType::ALL
            .into_iter()
            .find(|op| op.code() == code)
            .ok_or(DomainError::InvalidOperation)
    }
}

impl fmt::Display for OperationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OperationType::Purchase => "PURCHASE",
            OperationType::InstallmentPurchase => "INSTALLMENT PURCHASE",
            OperationType::Withdrawal => "WITHDRAWAL",
            OperationType::Payment => "PAYMENT",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn classification() {
        assert!(OperationType::Purchase.is_debit());
        assert!(OperationType::InstallmentPurchase.is_debit());
        assert!(OperationType::Withdrawal.is_debit());
        assert!(!OperationType::Payment.is_debit());

        assert!(OperationType::Payment.is_credit());
        assert!(!OperationType::Purchase.is_credit());
    }

    #[test]
    fn every_type_is_exactly_one_class() {
        for op in OperationType::ALL {
            assert_ne!(op.is_debit(), op.is_credit(), "{op}");
        }
    }

    #[test]
    fn codes_round_trip_through_try_from() {
        for op in OperationType::ALL {
            assert_eq!(OperationType::try_from(op.code()), Ok(op));
        }
    }

    #[test]
    fn unknown_codes_are_invalid() {
        for code in [0, 5, 99, -1, i16::MAX] {
            assert_eq!(
                OperationType::try_from(code),
                Err(DomainError::InvalidOperation)
            );
        }
    }

    #[test]
    fn signed_uses_magnitude() {
        assert_eq!(OperationType::Purchase.signed(dec!(100.50)), dec!(-100.50));
        assert_eq!(OperationType::Purchase.signed(dec!(-100.50)), dec!(-100.50));
        assert_eq!(OperationType::Payment.signed(dec!(50.0)), dec!(50.0));
        assert_eq!(OperationType::Payment.signed(dec!(-50.0)), dec!(50.0));
    }
}
