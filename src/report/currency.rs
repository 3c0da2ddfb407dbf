/// Formats an amount as rupiah: `1234567.0` becomes `"Rp. 1.234.567"`.
///
/// Thousands are grouped with `.`. Cents are only shown, after a `,`, when the
/// amount rounded to cents is not whole.
pub fn to_readable_num(value: f64) -> String{
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let fraction = cents % 100;

    let digits = whole.to_string();
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }

    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };

    if fraction == 0 {
        format!("Rp. {}{}", sign, grouped)
    } else {
        format!("Rp. {}{},{:02}", sign, grouped, fraction)
    }
}
