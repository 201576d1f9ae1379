pub fn join<'a, T, S>(i: T, sep: S) -> String
where
    T: IntoIterator,
    T::Item: ToString,
    S: Into<&'a str>,
{
    i.into_iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join(sep.into())
}

pub fn map_join<'a, T, S, F>(i: T, sep: S, f: F) -> String
where
    T: IntoIterator,
    S: Into<&'a str>,
    F: Fn(T::Item) -> String,
{
    i.into_iter().map(f).collect::<Vec<_>>().join(sep.into())
}

pub fn indent_lines<S: std::fmt::Display>(s: S, n: usize) -> String {
    s.to_string()
        .lines()
        .map(|l| format!("{}{}", " ".repeat(n), l))
        .collect::<Vec<_>>()
        .join("\n")
}
