use std::time::Duration;
use std::iter::Enumerate;

use indicatif::ProgressBar;
use indicatif::ProgressStyle;


pub(crate) trait ProgressObserver {

    // the parameters are passed as callbacks in case the progress implementation doesn't care (such as the unit observer used in tests)
    fn start<Message: AsRef<str>, Callback: FnOnce() -> (Message,Option<usize>)>(&mut self, callback: Callback);

    fn update<Callback: FnOnce() -> usize>(&self, callback: Callback);

    fn announce<Message: AsRef<str>, Callback: FnOnce() -> Message>(&self, callback: Callback);

    fn warning<Message: AsRef<str>, Callback: FnOnce() -> Message>(&self, callback: Callback);

    fn finish<Message: AsRef<str>, Callback: FnOnce() -> Message>(&mut self, callback: Callback);

}


// This one allows for not observing when you don't need it.
impl ProgressObserver for () {

    fn start<Message: AsRef<str>, Callback: FnOnce() -> (Message,Option<usize>)>(&mut self, _: Callback) {
    }

    fn update<Callback: FnOnce() -> usize>(&self, _: Callback) {
    }

    fn announce<Message: AsRef<str>, Callback: FnOnce() -> Message>(&self, _: Callback) {
    }

    fn warning<Message: AsRef<str>, Callback: FnOnce() -> Message>(&self, _: Callback){

    }

    fn finish<Message: AsRef<str>, Callback: FnOnce() -> Message>(&mut self, _: Callback) {
    }
}


pub(crate) struct ConsoleProgressBar {

    bar: Option<ProgressBar>

}

impl ConsoleProgressBar {

    pub(crate) const fn new() -> Self {
        Self {
            bar: None
        }
    }

    fn style_as_spinner(bar: &ProgressBar) {
        bar.enable_steady_tick(Duration::from_millis(100));
        if let Ok(style) = ProgressStyle::with_template("({elapsed_precise}) {msg} {spinner}") {
            bar.set_style(style);
        }

    }

    fn style_as_progress(bar: &ProgressBar) {
        bar.disable_steady_tick();
        if let Ok(style) = ProgressStyle::with_template("({elapsed_precise}) [{bar:40}] {pos}/{len} {msg}") {
            bar.set_style(style.progress_chars("=> "));
        }

    }

    fn style_as_finished(bar: &ProgressBar) {
        if let Ok(style) = ProgressStyle::with_template("({elapsed_precise}) {msg}") {
            bar.set_style(style);
        }

    }

    fn start_bar(&mut self, message: &str, step_count: Option<usize>) {
        if let Some(bar) = &self.bar {
            bar.reset();
            if let Some(step_count) = step_count {
                bar.set_length(step_count as u64);
                Self::style_as_progress(bar)
            } else {
                Self::style_as_spinner(bar);
            }
            bar.set_message(message.to_owned());
        } else {
            let bar = if let Some(step_count) = step_count {
                let bar = ProgressBar::new(step_count as u64);
                Self::style_as_progress(&bar);
                bar
            } else {
                let bar = ProgressBar::new_spinner();
                Self::style_as_spinner(&bar);
                bar
            };
            bar.set_message(message.to_owned());
            self.bar = Some(bar);
        }

    }


}

impl ProgressObserver for ConsoleProgressBar {

    fn start<Message: AsRef<str>, Callback: FnOnce() -> (Message,Option<usize>)>(&mut self, callback: Callback) {
        let (message,step_count) = callback();
        self.start_bar(message.as_ref(), step_count)
    }


    fn update<Callback: FnOnce() -> usize>(&self, callback: Callback) {
        if let Some(bar) = &self.bar {
            bar.set_position(callback() as u64);
        }
    }

    fn announce<Message: AsRef<str>, Callback: FnOnce() -> Message>(&self, callback: Callback) {
        let message = format!("== {} ==",callback().as_ref());
        if let Some(bar) = &self.bar {
            bar.println(message)
        } else {
            eprintln!("{message}")
        }
    }

    fn warning<Message: AsRef<str>, Callback: FnOnce() -> Message>(&self, callback: Callback){
        if let Some(bar) = &self.bar {
            bar.println(format!("warning: {}",callback().as_ref()))
        } else {
            eprintln!("warning: {}",callback().as_ref())
        }
    }

    fn finish<Message: AsRef<str>, Callback: FnOnce() -> Message>(&mut self, callback: Callback) {
        if let Some(bar) = &mut self.bar {
            Self::style_as_finished(bar);
            bar.finish_with_message(callback().as_ref().to_owned());
            self.bar = None;
        }
    }

}

pub(crate) struct IteratorWatcher<'progress,Message: AsRef<str>, Progress: ProgressObserver, IteratorType> {
    finish: Message,
    progress: &'progress mut Progress,
    inner: Enumerate<IteratorType>
}

impl<Message: AsRef<str>, Progress: ProgressObserver, ItemType, IteratorType: Iterator<Item=ItemType>> Iterator for IteratorWatcher<'_,Message,Progress,IteratorType> {

    type Item = ItemType;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some((i,next)) = self.inner.next() {
            self.progress.update(|| i);
            Some(next)
        } else {
            self.progress.finish(|| &self.finish);
            None
        }
        
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()        
    }
    

}

pub(crate) trait WatchableIterator: Iterator + Sized {

    fn watch<StartMessage: AsRef<str>, FinishMessage: AsRef<str>, Progress: ProgressObserver>(self, progress: &mut Progress, start: StartMessage, finish: FinishMessage) -> IteratorWatcher<'_, FinishMessage, Progress, Self>;
}

impl<IteratorType: Iterator> WatchableIterator for IteratorType {

    fn watch<StartMessage: AsRef<str>, FinishMessage: AsRef<str>, Progress: ProgressObserver>(self, progress: &mut Progress, start: StartMessage, finish: FinishMessage) -> IteratorWatcher<'_, FinishMessage, Progress, Self> {
        progress.start(|| (start,self.size_hint().1));
        IteratorWatcher { 
            finish, 
            progress, 
            inner: self.enumerate()
        }

    }


}
