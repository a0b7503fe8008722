// src/macros.rs
#[macro_export]
macro_rules! s {
    // String shorthand!
    () => {
        ::std::string::String::new()
    };
    ($expr:expr) => {
        ::std::string::String::from($expr)
    };
}

#[macro_export]
macro_rules! strings {
    // Vec<String> from anything `&str`-like: strings!["a", "b"], strings![..CONST]
    () => {
        ::std::vec::Vec::<::std::string::String>::new()
    };
    (..$slice:expr) => {
        $slice.iter().map(|x| ::std::string::String::from(*x)).collect::<::std::vec::Vec<_>>()
    };
    ($($item:expr),+ $(,)?) => {
        vec![$(::std::string::String::from($item)),+]
    };
}
