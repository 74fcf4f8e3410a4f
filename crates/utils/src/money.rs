/// Groups the integer part the Indian way (`12,34,567`) and keeps two
/// decimals.
pub fn group_indian(amount: f64) -> String {
    let negative = amount < 0.0;
    let paise = (amount.abs() * 100.0).round() as u64;
    let whole = (paise / 100).to_string();
    let fraction = paise % 100;

    let grouped = if whole.len() <= 3 {
        whole
    } else {
        let (mut head, tail) = whole.split_at(whole.len() - 3);
        let mut groups = Vec::new();
        while head.len() > 2 {
            let (rest, group) = head.split_at(head.len() - 2);
            groups.push(group);
            head = rest;
        }
        groups.push(head);
        groups.reverse();
        format!("{},{}", groups.join(","), tail)
    };

    format!(
        "{}{}.{:02}",
        if negative { "-" } else { "" },
        grouped,
        fraction
    )
}

/// Amount without the currency symbol and without `.00` on whole values.
pub fn format_amount(amount: f64) -> String {
    let grouped = group_indian(amount);
    grouped
        .strip_suffix(".00")
        .map(str::to_string)
        .unwrap_or(grouped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_indian() {
        assert_eq!(group_indian(0.0), "0.00");
        assert_eq!(group_indian(999.0), "999.00");
        assert_eq!(group_indian(7000.0), "7,000.00");
        assert_eq!(group_indian(100000.0), "1,00,000.00");
        assert_eq!(group_indian(1234567.5), "12,34,567.50");
        assert_eq!(group_indian(-2500.25), "-2,500.25");
    }

    #[test]
    fn test_format_amount_drops_zero_paise() {
        assert_eq!(format_amount(11000.0), "11,000");
        assert_eq!(format_amount(11000.5), "11,000.50");
    }
}
