pub(crate) type Clock = quanta::Clock;
