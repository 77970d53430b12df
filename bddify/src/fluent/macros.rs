//! The `step!` registration macro.

/// Captures a fixture method call as an [`Invocation`](crate::Invocation).
///
/// Write the call with the fixture type as the path:
/// `step!(Fixture::method(arg, ...))`. Each argument expression is evaluated
/// exactly once, when the macro runs, and its source text is kept to infer
/// [`Provenance`](crate::Provenance). Later changes to the variables, fields,
/// or accessors the arguments were read from do not affect the step.
///
/// Generic methods take a turbofish: `step!(Fixture::method::<E>())`.
/// Up to twelve arguments are supported.
///
/// ```
/// use bddify::{FluentScanner, step};
///
/// #[derive(Default)]
/// struct Fixture {
///     input: Option<String>,
/// }
///
/// impl Fixture {
///     fn given_an_input(&mut self, input: Option<String>) {
///         self.input = input;
///     }
///
///     fn then_the_input_is_absent(&self) {
///         assert!(self.input.is_none());
///     }
/// }
///
/// let mut input = None;
/// let scanner = FluentScanner::<Fixture>::scan()
///     .given(step!(Fixture::given_an_input(input.clone())));
/// input = Some(String::from("late"));
/// let story = scanner
///     .then(step!(Fixture::then_the_input_is_absent()))
///     .bddify_titled("Absent input")
///     .expect("scenario should run");
/// assert!(story.passed());
/// assert!(input.is_some());
/// ```
#[macro_export]
macro_rules! step {
    ($fixture:ident :: $method:ident $(:: < $($generic:ty),+ $(,)? >)? ( $($arg:expr),* $(,)? )) => {
        $crate::__step_bind!(
            @bind $fixture, $method, [$(:: < $($generic),+ >)?],
            [a0 a1 a2 a3 a4 a5 a6 a7 a8 a9 a10 a11],
            [],
            [$($arg),*]
        )
    };
}

/// Binds `step!` arguments to hygienic locals one at a time.
#[doc(hidden)]
#[macro_export]
macro_rules! __step_bind {
    (
        @bind $fixture:ident, $method:ident, [$($turbofish:tt)*],
        [$($pool:ident)*],
        [$($name:ident = $value:expr),*],
        []
    ) => {{
        $(
            let $name = $crate::__private::Captured::new($value, ::core::stringify!($value));
        )*
        let arguments = ::std::vec![$($name.snapshot()),*];
        $crate::Invocation::<$fixture>::new(
            ::core::stringify!($method),
            arguments,
            move |target: &mut $fixture| {
                $fixture::$method $($turbofish)* (target $(, $name.get())*)
            },
        )
    }};
    (
        @bind $fixture:ident, $method:ident, [$($turbofish:tt)*],
        [$next:ident $($pool:ident)*],
        [$($name:ident = $value:expr),*],
        [$head:expr $(, $tail:expr)*]
    ) => {
        $crate::__step_bind!(
            @bind $fixture, $method, [$($turbofish)*],
            [$($pool)*],
            [$($name = $value,)* $next = $head],
            [$($tail),*]
        )
    };
}

/// Humanized name of the function this macro is expanded in.
///
/// Closures are looked through, so the title names the enclosing `fn`.
///
/// ```
/// fn when_title_is_not_provided_it_is_fetched_from_method_name() -> String {
///     bddify::scenario_title!()
/// }
///
/// assert_eq!(
///     when_title_is_not_provided_it_is_fetched_from_method_name(),
///     "When title is not provided it is fetched from method name",
/// );
/// ```
#[macro_export]
macro_rules! scenario_title {
    () => {{
        fn here() {}
        $crate::title::function_title(::core::any::type_name_of_val(&here))
    }};
}

/// Runs a scenario titled after the calling function.
///
/// Expands to `scanner.bddify_titled(&scenario_title!())`, so it accepts a
/// [`FluentScanner`](crate::FluentScanner) or, with
/// [`Bddify`](crate::Bddify) in scope, a convention fixture. The story keeps
/// the fixture's type name as its title.
///
/// ```
/// use bddify::{FluentScanner, step};
///
/// #[derive(Default)]
/// struct Checkout {
///     items: u32,
/// }
///
/// impl Checkout {
///     fn given_two_items(&mut self) {
///         self.items = 2;
///     }
/// }
///
/// fn paying_for_two_items() -> bddify::BddifyResult<bddify::Story> {
///     bddify::bddify!(
///         FluentScanner::<Checkout>::scan().given(step!(Checkout::given_two_items()))
///     )
/// }
///
/// let story = paying_for_two_items().expect("scenario should run");
/// assert_eq!(story.title(), "Checkout");
/// assert_eq!(
///     story.scenarios().first().map(|scenario| scenario.title()),
///     Some("Paying for two items"),
/// );
/// ```
#[macro_export]
macro_rules! bddify {
    ($scanner:expr $(,)?) => {
        $scanner.bddify_titled(&$crate::scenario_title!())
    };
}
