//! Macros for ergonomic transition tables.

/// Build a `Vec<Transition<_>>` from `from, event => to` rows.
///
/// Rows keep their written order, so the first row's source is the
/// composite's default child.
///
/// # Example
///
/// ```
/// use hfsm::builder::TreeBuilder;
/// use hfsm::core::State;
/// use hfsm::transitions;
///
/// struct Named(&'static str);
///
/// impl State<(), char> for Named {
///     fn name(&self) -> &str {
///         self.0
///     }
/// }
///
/// let mut builder = TreeBuilder::<(), char>::new();
/// let a = builder.leaf(Named("A"));
/// let b = builder.leaf(Named("B"));
///
/// let table = transitions! {
///     a, 'n' => b;
///     b, 'n' => a;
/// };
/// assert_eq!(table.len(), 2);
/// assert_eq!(table[0].from, a);
///
/// builder.root(table);
/// assert!(builder.build().is_ok());
/// ```
#[macro_export]
macro_rules! transitions {
    () => {
        ::std::vec::Vec::<$crate::core::Transition<_>>::new()
    };
    ($($from:expr, $event:expr => $to:expr);+ $(;)?) => {
        ::std::vec![$($crate::core::Transition::new($from, $event, $to)),+]
    };
}
