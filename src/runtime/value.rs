/// Element of the evaluation stack: either a single number or the transient
/// argument list a grouper builds for a function call.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Operand {
    Number(f64),
    List(Vec<f64>),
}

impl Operand {
    /// Coerces to an argument list; a bare number becomes a one-element list.
    pub fn into_list(self) -> Vec<f64> {
        match self {
            Self::Number(value) => vec![value],
            Self::List(values) => values,
        }
    }
}

#[cfg(test)]
mod test {
    use super::Operand;

    #[test]
    fn number_coerces_to_singleton_list() {
        assert_eq!(Operand::Number(4.5).into_list(), vec![4.5]);
    }

    #[test]
    fn list_coercion_is_identity() {
        assert_eq!(
            Operand::List(vec![1.0, 2.0]).into_list(),
            vec![1.0, 2.0]
        );
    }
}
