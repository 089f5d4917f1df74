//! Property test harness for the response export tool.

mod csv_props;
