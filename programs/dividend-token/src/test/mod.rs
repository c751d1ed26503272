mod test_distribution;
mod test_transfer;
