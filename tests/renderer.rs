mod tests {
    use core::convert::Infallible;

    use ledsegs_composer::color::{BLUE, GREEN, OFF, RED, Rgb};
    use ledsegs_composer::random_mask::RANDOM_MASK_SIZE;
    use ledsegs_composer::renderer::scale_level;
    use ledsegs_composer::{
        Action, BandMask, PixelSink, RandomMask, SegmentOptions, SegmentRenderer, SegmentTable,
        SegmentUpdate,
    };

    /// Records pixels and counts flushes
    struct MockSink {
        pixels: Vec<Rgb>,
        writes: usize,
        flushes: usize,
    }

    impl MockSink {
        fn new(led_count: usize) -> Self {
            Self {
                pixels: vec![Rgb::new(9, 9, 9); led_count],
                writes: 0,
                flushes: 0,
            }
        }
    }

    impl PixelSink for MockSink {
        type Error = Infallible;

        fn set_pixel(&mut self, index: usize, color: Rgb) {
            self.pixels[index] = color;
            self.writes += 1;
        }

        fn flush(&mut self) -> Result<(), Self::Error> {
            self.flushes += 1;
            Ok(())
        }
    }

    /// Even positions get a low threshold, odd positions a high one
    fn alternating_mask() -> RandomMask {
        let mut thresholds = [0u16; RANDOM_MASK_SIZE];
        for (i, threshold) in thresholds.iter_mut().enumerate() {
            *threshold = if i % 2 == 0 { 100 } else { 900 };
        }
        RandomMask::from_thresholds(thresholds)
    }

    fn render<const N: usize>(renderer: &SegmentRenderer, table: &SegmentTable<N>) -> MockSink {
        let mut sink = MockSink::new(renderer.led_count());
        renderer.render_all(table, &mut sink).unwrap();
        sink
    }

    fn define_with_level<const N: usize>(
        table: &mut SegmentTable<N>,
        first_led: u16,
        num_leds: u16,
        action: Action,
        level: u16,
    ) -> usize {
        let index = table.define(first_led, num_leds, action, RED, BandMask::BAND1).unwrap();
        table.get_mut(index).unwrap().set_level(level);
        index
    }

    #[test]
    fn test_scale_level() {
        assert_eq!(scale_level(255, 10), 2);
        assert_eq!(scale_level(0, 10), 0);
        assert_eq!(scale_level(1023, 10), 10);
        assert_eq!(scale_level(466, 10), 5);
        assert_eq!(scale_level(1023, 0), 0);
    }

    #[test]
    fn test_clears_and_flushes_once() {
        let renderer = SegmentRenderer::new(6, alternating_mask());
        let table = SegmentTable::<4>::new();
        let sink = render(&renderer, &table);
        assert_eq!(sink.pixels, vec![OFF; 6]);
        assert_eq!(sink.flushes, 1);
    }

    #[test]
    fn test_from_bottom() {
        let renderer = SegmentRenderer::new(10, alternating_mask());
        let mut table = SegmentTable::<4>::new();
        let index = define_with_level(&mut table, 0, 10, Action::FromBottom, 255);
        table
            .update(index, &SegmentUpdate::default().back_color(BLUE))
            .unwrap();

        let sink = render(&renderer, &table);
        assert_eq!(&sink.pixels[..2], &[RED, RED]);
        assert_eq!(&sink.pixels[2..], &[BLUE; 8]);
    }

    #[test]
    fn test_from_top() {
        let renderer = SegmentRenderer::new(12, alternating_mask());
        let mut table = SegmentTable::<4>::new();
        define_with_level(&mut table, 2, 10, Action::FromTop, 255);

        let sink = render(&renderer, &table);
        assert_eq!(&sink.pixels[10..], &[RED, RED]);
        assert_eq!(&sink.pixels[..10], &[OFF; 10]);
    }

    #[test]
    fn test_from_middle() {
        let renderer = SegmentRenderer::new(5, alternating_mask());
        let mut table = SegmentTable::<4>::new();
        // 600 * 6 / 1024 = 3 lit: centre, above, below
        define_with_level(&mut table, 0, 5, Action::FromMiddle, 600);

        let sink = render(&renderer, &table);
        assert_eq!(sink.pixels, vec![OFF, RED, RED, RED, OFF]);
    }

    #[test]
    fn test_from_middle_spacing() {
        let renderer = SegmentRenderer::new(5, alternating_mask());
        let mut table = SegmentTable::<4>::new();
        let index = define_with_level(&mut table, 0, 5, Action::FromMiddle, 1023);
        table
            .update(index, &SegmentUpdate::default().spacing(1))
            .unwrap();

        // Each symmetric pair shares one grid slot
        let sink = render(&renderer, &table);
        assert_eq!(sink.pixels, vec![RED, OFF, RED, OFF, RED]);

        // 600 * 6 / 1024 = 3: only the centre is lit, the outer pair gets back
        table
            .update(index, &SegmentUpdate::default().back_color(BLUE))
            .unwrap();
        table.get_mut(index).unwrap().set_level(600);
        let sink = render(&renderer, &table);
        assert_eq!(sink.pixels, vec![BLUE, OFF, RED, OFF, BLUE]);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "past the strip")]
    fn test_write_past_strip_asserts() {
        let renderer = SegmentRenderer::new(10, alternating_mask());
        let mut table = SegmentTable::<4>::new();
        define_with_level(&mut table, 8, 4, Action::FromBottom, 1023);
        render(&renderer, &table);
    }

    #[test]
    fn test_level_is_clamped() {
        let renderer = SegmentRenderer::new(10, alternating_mask());
        let mut table = SegmentTable::<4>::new();
        define_with_level(&mut table, 0, 10, Action::FromBottom, 5000);

        let sink = render(&renderer, &table);
        assert_eq!(sink.pixels, vec![RED; 10]);
    }

    #[test]
    fn test_invert_level() {
        let renderer = SegmentRenderer::new(10, alternating_mask());
        let mut table = SegmentTable::<4>::new();
        let index = define_with_level(&mut table, 0, 10, Action::FromBottom, 1023);
        table
            .update(
                index,
                &SegmentUpdate::default()
                    .back_color(GREEN)
                    .options(SegmentOptions::INVERT_LEVEL),
            )
            .unwrap();

        let sink = render(&renderer, &table);
        assert_eq!(sink.pixels, vec![GREEN; 10]);
        // Rendering does not touch the stored level
        assert_eq!(table.get(index).unwrap().level(), 1023);
    }

    #[test]
    fn test_invert_level_drives_random() {
        let renderer = SegmentRenderer::new(10, alternating_mask());
        let mut table = SegmentTable::<4>::new();
        let index = define_with_level(&mut table, 0, 10, Action::Random, 523);
        table
            .update(index, &SegmentUpdate::default().options(SegmentOptions::INVERT_LEVEL))
            .unwrap();

        // 1023 - 523 = 500 beats the even thresholds only
        let sink = render(&renderer, &table);
        let lit: Vec<usize> = (0..10).filter(|&led| sink.pixels[led] == RED).collect();
        assert_eq!(lit, vec![0, 2, 4, 6, 8]);
        assert_eq!(table.get(index).unwrap().level(), 523);
    }

    #[test]
    fn test_static_ignores_level() {
        let renderer = SegmentRenderer::new(10, alternating_mask());
        let mut table = SegmentTable::<4>::new();
        define_with_level(&mut table, 0, 10, Action::Static, 0);

        let sink = render(&renderer, &table);
        assert_eq!(sink.pixels, vec![RED; 10]);
    }

    #[test]
    fn test_static_spacing() {
        let renderer = SegmentRenderer::new(10, alternating_mask());
        let mut table = SegmentTable::<4>::new();
        let index = define_with_level(&mut table, 0, 10, Action::Static, 0);
        table
            .update(index, &SegmentUpdate::default().spacing(1))
            .unwrap();

        let sink = render(&renderer, &table);
        let lit: Vec<usize> = (0..10).filter(|&led| sink.pixels[led] == RED).collect();
        assert_eq!(lit, vec![0, 2, 4, 6, 8]);
    }

    #[test]
    fn test_modulate_segment() {
        let renderer = SegmentRenderer::new(10, alternating_mask());
        let mut table = SegmentTable::<4>::new();
        let index = table
            .define(0, 10, Action::Static, Rgb::new(100, 0, 0), BandMask::BAND1)
            .unwrap();
        let segment = table.get_mut(index).unwrap();
        segment.set_options(SegmentOptions::MODULATE_SEGMENT);
        segment.set_level(466);

        let sink = render(&renderer, &table);
        assert_eq!(sink.pixels, vec![Rgb::new(50, 0, 0); 10]);
    }

    #[test]
    fn test_no_off_overwrite() {
        let renderer = SegmentRenderer::new(10, alternating_mask());
        let mut table = SegmentTable::<4>::new();
        define_with_level(&mut table, 0, 10, Action::Static, 0);
        let top = table.define(0, 10, Action::FromBottom, GREEN, BandMask::BAND1).unwrap();
        table.get_mut(top).unwrap().set_level(255);

        let sink = render(&renderer, &table);
        assert_eq!(&sink.pixels[..2], &[GREEN, GREEN]);
        assert_eq!(&sink.pixels[2..], &[OFF; 8]);

        table
            .update(top, &SegmentUpdate::default().options(SegmentOptions::NO_OFF_OVERWRITE))
            .unwrap();
        let sink = render(&renderer, &table);
        assert_eq!(&sink.pixels[..2], &[GREEN, GREEN]);
        assert_eq!(&sink.pixels[2..], &[RED; 8]);
    }

    #[test]
    fn test_overlap_later_segment_wins() {
        let renderer = SegmentRenderer::new(10, alternating_mask());
        let mut table = SegmentTable::<8>::new();
        for _ in 0..3 {
            table.define(0, 0, Action::None, OFF, BandMask::empty()).unwrap();
        }
        let low = table.define(0, 6, Action::Static, RED, BandMask::empty()).unwrap();
        for _ in 0..3 {
            table.define(0, 0, Action::None, OFF, BandMask::empty()).unwrap();
        }
        let high = table.define(4, 6, Action::Static, BLUE, BandMask::empty()).unwrap();
        assert_eq!((low, high), (3, 7));

        let sink = render(&renderer, &table);
        assert_eq!(sink.pixels[1], RED);
        assert_eq!(sink.pixels[4], BLUE);
        assert_eq!(sink.pixels[5], BLUE);
        assert_eq!(sink.pixels[9], BLUE);
    }

    #[test]
    fn test_none_action_is_skipped() {
        let renderer = SegmentRenderer::new(4, alternating_mask());
        let mut table = SegmentTable::<4>::new();
        define_with_level(&mut table, 0, 4, Action::None, 1023);

        let sink = render(&renderer, &table);
        assert_eq!(sink.pixels, vec![OFF; 4]);
        // Only the clearing pass wrote
        assert_eq!(sink.writes, 4);
    }

    #[test]
    fn test_random_uses_mask() {
        let renderer = SegmentRenderer::new(10, alternating_mask());
        let mut table = SegmentTable::<4>::new();
        define_with_level(&mut table, 0, 10, Action::Random, 500);

        let sink = render(&renderer, &table);
        let lit: Vec<usize> = (0..10).filter(|&led| sink.pixels[led] == RED).collect();
        assert_eq!(lit, vec![0, 2, 4, 6, 8]);

        table.get_mut(0).unwrap().set_level(950);
        let sink = render(&renderer, &table);
        assert_eq!(sink.pixels, vec![RED; 10]);
    }

    #[test]
    fn test_random_is_stable_until_reseeded() {
        let mut renderer = SegmentRenderer::new(80, RandomMask::new(7));
        let mut table = SegmentTable::<4>::new();
        define_with_level(&mut table, 0, 80, Action::Random, 512);

        let first = render(&renderer, &table);
        let second = render(&renderer, &table);
        assert_eq!(first.pixels, second.pixels);

        *renderer.random_mask_mut() = alternating_mask();
        let third = render(&renderer, &table);
        let lit: Vec<usize> = (0..80).filter(|&led| third.pixels[led] == RED).collect();
        assert_eq!(lit, (0..80).step_by(2).collect::<Vec<_>>());
    }

    #[test]
    fn test_random_mask_wraps_after_64() {
        let mut thresholds = [1000u16; RANDOM_MASK_SIZE];
        thresholds[1] = 0;
        let renderer = SegmentRenderer::new(70, RandomMask::from_thresholds(thresholds));
        let mut table = SegmentTable::<4>::new();
        define_with_level(&mut table, 0, 70, Action::Random, 10);

        let sink = render(&renderer, &table);
        let lit: Vec<usize> = (0..70).filter(|&led| sink.pixels[led] == RED).collect();
        assert_eq!(lit, vec![1, 65]);
    }
}
