//! 可变参数适配：让 builder 方法同时接受单个值、数组、切片与 Vec。

use crate::condition::Condition;

/// 列名列表参数。
pub trait IntoStrings {
    fn extend_into_strings(self, dst: &mut Vec<String>);
}

impl IntoStrings for String {
    fn extend_into_strings(self, dst: &mut Vec<String>) {
        dst.push(self);
    }
}

impl IntoStrings for &str {
    fn extend_into_strings(self, dst: &mut Vec<String>) {
        dst.push(self.to_string());
    }
}

impl<const N: usize, T> IntoStrings for [T; N]
where
    T: Into<String>,
{
    fn extend_into_strings(self, dst: &mut Vec<String>) {
        dst.extend(self.into_iter().map(Into::into));
    }
}

impl<T> IntoStrings for &[T]
where
    T: Into<String> + Clone,
{
    fn extend_into_strings(self, dst: &mut Vec<String>) {
        dst.extend(self.iter().cloned().map(Into::into));
    }
}

impl<T> IntoStrings for Vec<T>
where
    T: Into<String>,
{
    fn extend_into_strings(self, dst: &mut Vec<String>) {
        dst.extend(self.into_iter().map(Into::into));
    }
}

pub fn collect_into_strings(v: impl IntoStrings) -> Vec<String> {
    let mut out = Vec::new();
    v.extend_into_strings(&mut out);
    out
}

/// 条件列表参数（`and` / `or` 使用）。
pub trait IntoConditions {
    fn extend_into_conditions(self, dst: &mut Vec<Condition>);
}

impl IntoConditions for Condition {
    fn extend_into_conditions(self, dst: &mut Vec<Condition>) {
        dst.push(self);
    }
}

impl IntoConditions for &Condition {
    fn extend_into_conditions(self, dst: &mut Vec<Condition>) {
        dst.push(self.clone());
    }
}

impl<const N: usize> IntoConditions for [Condition; N] {
    fn extend_into_conditions(self, dst: &mut Vec<Condition>) {
        dst.extend(self);
    }
}

impl<const N: usize> IntoConditions for [&Condition; N] {
    fn extend_into_conditions(self, dst: &mut Vec<Condition>) {
        dst.extend(self.into_iter().cloned());
    }
}

impl IntoConditions for Vec<Condition> {
    fn extend_into_conditions(self, dst: &mut Vec<Condition>) {
        dst.extend(self);
    }
}

pub fn collect_into_conditions(v: impl IntoConditions) -> Vec<Condition> {
    let mut out = Vec::new();
    v.extend_into_conditions(&mut out);
    out
}
