mod test_engine_tick;
