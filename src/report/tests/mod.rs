// Tests for the lobby report pipeline


#[cfg(test)]
mod test_report_order;
